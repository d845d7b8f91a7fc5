use super::{AppContext, ThumbmarkCommand};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use thumbmark::error::Result;
use thumbmark::operations;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCommand {
    pub ids: Vec<String>,
    pub force: bool,
}

impl ThumbmarkCommand for DeleteCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let existing = operations::select_bookmarks(ctx.db, &self.ids)?;

        if existing.is_empty() {
            eprintln!("No bookmarks to delete.");
            return Ok(());
        }

        eprintln!("Bookmarks to be deleted:");
        for bookmark in &existing {
            eprintln!("  {}. {}", bookmark.id, bookmark.url);
        }

        // Ask for confirmation unless --force
        let confirmed = if self.force {
            true
        } else {
            eprint!("\nDelete {} bookmark(s)? [y/N]: ", existing.len());
            io::stderr().flush()?;

            let mut response = String::new();
            io::stdin().read_line(&mut response)?;
            let response = response.trim().to_lowercase();
            response == "y" || response == "yes"
        };

        if confirmed {
            let ids: Vec<i64> = existing.iter().map(|b| b.id).collect();
            let count = operations::delete_bookmarks(ctx.db, ctx.thumbs, &ids)?;
            eprintln!("Deleted {} bookmark(s).", count);
        } else {
            eprintln!("Deletion cancelled.");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{fake_capture, TestEnv};
    use rstest::rstest;

    fn add(env: &TestEnv, url: &str) -> i64 {
        operations::add_bookmark(&env.db, &env.thumbs, &fake_capture, url)
            .expect("Add failed")
            .id
    }

    #[rstest]
    fn test_delete_command() {
        let env = TestEnv::new();
        let id = add(&env, "https://example.com");

        let cmd = DeleteCommand {
            ids: vec![id.to_string()],
            force: true, // Force to skip confirmation in tests
        };

        cmd.execute(&env.ctx(&fake_capture)).expect("delete failed");

        assert!(env.db.get_by_id(id).unwrap().is_none());
        assert!(!env.thumbs.exists(id));
    }

    #[rstest]
    fn test_delete_command_range() {
        let env = TestEnv::new();
        add(&env, "https://a.example");
        add(&env, "https://b.example");
        let kept = add(&env, "https://c.example");

        let cmd = DeleteCommand {
            ids: vec!["1-2".to_string()],
            force: true,
        };
        cmd.execute(&env.ctx(&fake_capture)).unwrap();

        let remaining: Vec<i64> = env.db.list_all().unwrap().iter().map(|b| b.id).collect();
        assert_eq!(remaining, vec![kept]);
    }

    #[rstest]
    fn test_delete_command_huge_range() {
        let env = TestEnv::new();
        add(&env, "https://a.example");
        add(&env, "https://b.example");

        let cmd = DeleteCommand {
            ids: vec!["1-9223372036854775807".to_string()],
            force: true,
        };
        cmd.execute(&env.ctx(&fake_capture)).unwrap();
        assert_eq!(env.db.count().unwrap(), 0);
    }

    #[rstest]
    fn test_delete_command_missing_id_is_noop() {
        let env = TestEnv::new();
        add(&env, "https://example.com");

        let cmd = DeleteCommand {
            ids: vec!["99".to_string()],
            force: false,
        };

        // never prompts when nothing matches
        cmd.execute(&env.ctx(&fake_capture)).unwrap();
        assert_eq!(env.db.count().unwrap(), 1);
    }

    #[rstest]
    fn test_delete_command_invalid_id() {
        let env = TestEnv::new();
        let cmd = DeleteCommand {
            ids: vec!["abc".to_string()],
            force: true,
        };
        assert!(cmd.execute(&env.ctx(&fake_capture)).is_err());
    }
}
