use super::{AppContext, ThumbmarkCommand};
use crate::capture_ui::{batch_progress, report_entry};
use serde::{Deserialize, Serialize};
use thumbmark::error::Result;
use thumbmark::operations;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshCommand;

impl ThumbmarkCommand for RefreshCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let pending = ctx.db.list_missing_thumbnails()?.len();
        if pending == 0 {
            eprintln!("All bookmarks have thumbnails.");
            return Ok(());
        }

        let summary = ctx.with_capture(|capture| {
            let pb = batch_progress(pending, "Capturing");
            let result = operations::refresh_missing_thumbnails(
                ctx.db,
                ctx.thumbs,
                capture,
                |index, _total, url| report_entry(&pb, "Capturing", index, url),
            );
            pb.finish_and_clear();
            result
        })?;

        eprintln!(
            "Refreshed {} of {} thumbnail(s)",
            summary.refreshed, summary.attempted
        );
        if summary.failed > 0 {
            eprintln!("  {} failed (run with -g for details)", summary.failed);
        }
        Ok(())
    }
}
