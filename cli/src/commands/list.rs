use super::{AppContext, ThumbmarkCommand};
use crate::format::OutputFormat;
use serde::{Deserialize, Serialize};
use thumbmark::error::Result;
use thumbmark::operations;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCommand {
    /// Only bookmarks whose thumbnail is missing
    pub missing: bool,
    pub format: Option<String>,
    pub nc: bool,
}

impl ThumbmarkCommand for ListCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let records = if self.missing {
            ctx.db.list_missing_thumbnails()?
        } else {
            operations::list_bookmarks(ctx.db)?
        };

        let format: OutputFormat = self
            .format
            .as_deref()
            .map(OutputFormat::from_string)
            .unwrap_or(OutputFormat::Colored);

        if records.is_empty() && format == OutputFormat::Colored {
            eprintln!("No bookmarks to display.");
            return Ok(());
        }

        let mut out = std::io::stdout().lock();
        format.write_bookmarks(&mut out, &records, ctx.thumbs, self.nc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{fake_capture, TestEnv};
    use rstest::rstest;

    #[rstest]
    #[case(None, false)]
    #[case(Some("json"), false)]
    #[case(Some("yaml"), true)]
    #[case(None, true)]
    fn test_list_command(#[case] format: Option<&str>, #[case] missing: bool) {
        let env = TestEnv::new();
        operations::add_bookmark(&env.db, &env.thumbs, &fake_capture, "https://example.com")
            .unwrap();
        env.db.insert("https://bare.example").unwrap();

        let cmd = ListCommand {
            missing,
            format: format.map(str::to_string),
            nc: true,
        };
        assert!(cmd.execute(&env.ctx(&fake_capture)).is_ok());
    }

    #[test]
    fn test_list_command_empty_store() {
        let env = TestEnv::new();
        let cmd = ListCommand {
            missing: false,
            format: None,
            nc: true,
        };
        assert!(cmd.execute(&env.ctx(&fake_capture)).is_ok());
    }
}
