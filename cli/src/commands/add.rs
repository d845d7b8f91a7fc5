use super::{AppContext, ThumbmarkCommand};
use crate::capture_ui::capture_with_spinner;
use serde::{Deserialize, Serialize};
use thumbmark::error::Result;
use thumbmark::operations;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommand {
    pub url: String,
}

impl ThumbmarkCommand for AddCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let bookmark = ctx.with_capture(|capture| {
            capture_with_spinner(&self.url, || {
                operations::add_bookmark(ctx.db, ctx.thumbs, capture, &self.url)
            })
        })?;

        eprintln!("Added bookmark at index {}", bookmark.id);
        Ok(())
    }
}
