use super::{AppContext, ThumbmarkCommand};
use crate::capture_ui::{batch_progress, report_entry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thumbmark::error::Result;
use thumbmark::import_export::{self, netscape, ImportSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportCommand {
    pub file: PathBuf,
}

impl ThumbmarkCommand for ImportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        // read and decode first so a missing or malformed file never needs a browser
        let bytes = std::fs::read(&self.file)?;
        let entries = netscape::decode(&bytes)?;

        let summary = if entries.is_empty() {
            ImportSummary::default()
        } else {
            ctx.with_capture(|capture| {
                let pb = batch_progress(entries.len(), "Importing");
                let result = import_export::import_entries_with_progress(
                    ctx.db,
                    ctx.thumbs,
                    capture,
                    &entries,
                    |index, _, url| report_entry(&pb, "Importing", index, url),
                );
                pb.finish_and_clear();
                result
            })?
        };

        eprintln!(
            "✓ Successfully imported {} new bookmark(s) from {}",
            summary.imported,
            self.file.display()
        );
        if summary.duplicates > 0 || summary.failed > 0 {
            eprintln!(
                "  {} already bookmarked, {} failed (run with -g for details)",
                summary.duplicates, summary.failed
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportCommand {
    pub file: PathBuf,
}

impl ThumbmarkCommand for ExportCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let count = import_export::export_to_path(ctx.db, &self.file)?;
        eprintln!(
            "Exported {} bookmark(s) from {} to {}",
            count,
            ctx.db_path.display(),
            self.file.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{fake_capture, TestEnv};
    use std::fs;
    use thumbmark::error::ThumbmarkError;
    use thumbmark::operations;

    const BROWSER_EXPORT: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1700000000">Toolbar</H3>
    <DL><p>
        <DT><A HREF="https://rust-lang.org" ADD_DATE="1700000001">Rust</A>
        <DT><A HREF="https://fail.example" ADD_DATE="1700000002">Down</A>
    </DL><p>
    <DT><A HREF="https://example.com" ADD_DATE="1700000003">Example</A>
</DL><p>
"#;

    #[test]
    fn test_import_command() {
        let env = TestEnv::new();
        operations::add_bookmark(&env.db, &env.thumbs, &fake_capture, "https://example.com")
            .unwrap();
        let file = env.dir.path().join("browser.html");
        fs::write(&file, BROWSER_EXPORT).unwrap();

        let cmd = ImportCommand { file };
        cmd.execute(&env.ctx(&fake_capture)).expect("import failed");

        let urls: Vec<String> = env
            .db
            .list_all()
            .unwrap()
            .into_iter()
            .map(|b| b.url)
            .collect();
        assert_eq!(urls, vec!["https://example.com", "https://rust-lang.org"]);
    }

    #[test]
    fn test_import_command_rejects_non_netscape() {
        let env = TestEnv::new();
        let file = env.dir.path().join("notes.html");
        fs::write(&file, "<html><body>hello</body></html>").unwrap();

        let cmd = ImportCommand { file };
        let result = cmd.execute(&env.ctx(&fake_capture));

        assert!(matches!(result, Err(ThumbmarkError::Format(_))));
        assert_eq!(env.db.count().unwrap(), 0);
    }

    #[test]
    fn test_import_command_format_error_before_browser_lookup() {
        let env = TestEnv::new();
        let file = env.dir.path().join("notes.html");
        fs::write(&file, "<html><body>hello</body></html>").unwrap();

        let ctx = AppContext {
            capture: None,
            ..env.ctx(&fake_capture)
        };
        let result = ImportCommand { file }.execute(&ctx);
        assert!(matches!(result, Err(ThumbmarkError::Format(_))));
    }

    #[test]
    fn test_import_command_empty_document_needs_no_browser() {
        let env = TestEnv::new();
        let file = env.dir.path().join("empty.html");
        fs::write(
            &file,
            "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n<TITLE>Bookmarks</TITLE>\n<DL><p>\n</DL><p>\n",
        )
        .unwrap();

        let ctx = AppContext {
            capture: None,
            ..env.ctx(&fake_capture)
        };
        ImportCommand { file }.execute(&ctx).unwrap();
        assert_eq!(env.db.count().unwrap(), 0);
    }

    #[test]
    fn test_import_command_missing_file() {
        let env = TestEnv::new();
        let cmd = ImportCommand {
            file: env.dir.path().join("absent.html"),
        };
        let result = cmd.execute(&env.ctx(&fake_capture));
        assert!(matches!(result, Err(ThumbmarkError::Io(_))));
    }

    #[test]
    fn test_export_command() {
        let env = TestEnv::new();
        operations::add_bookmark(&env.db, &env.thumbs, &fake_capture, "https://a.example")
            .unwrap();
        operations::add_bookmark(&env.db, &env.thumbs, &fake_capture, "https://b.example")
            .unwrap();
        let file = env.dir.path().join("bookmarks.html");

        let cmd = ExportCommand { file: file.clone() };
        cmd.execute(&env.ctx(&fake_capture)).expect("export failed");

        let body = fs::read_to_string(&file).unwrap();
        assert_eq!(body.matches("<DT><A HREF=").count(), 2);
        assert!(body.contains("HREF=\"https://a.example\""));
        assert!(body.contains("HREF=\"https://b.example\""));
    }
}
