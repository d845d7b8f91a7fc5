use std::path::Path;
use thumbmark::capture::{Capture, HeadlessBrowser};
use thumbmark::config::Config;
use thumbmark::db::BookmarkDb;
use thumbmark::error::Result;
use thumbmark::thumbnails::ThumbnailStore;

pub struct AppContext<'a> {
    pub db: &'a BookmarkDb,
    pub config: &'a Config,
    pub db_path: &'a Path,
    pub thumbs: &'a ThumbnailStore,
    /// Capture override; a headless browser is built from config when unset
    pub capture: Option<&'a dyn Capture>,
}

impl AppContext<'_> {
    /// Run `f` with a capture backend. Commands that never capture never
    /// need a browser installed.
    pub fn with_capture<T>(&self, f: impl FnOnce(&dyn Capture) -> Result<T>) -> Result<T> {
        match self.capture {
            Some(capture) => f(capture),
            None => {
                let browser = HeadlessBrowser::from_config(&self.config.capture)?;
                log::debug!("Capturing with {}", browser.binary().display());
                f(&browser)
            }
        }
    }
}

pub mod add;
pub mod delete;
pub mod import_export;
pub mod list;
pub mod refresh;

pub trait ThumbmarkCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()>;
}

/// Enum-based dispatch for commands (avoids Box<dyn ThumbmarkCommand>)
pub enum CommandEnum {
    Add(add::AddCommand),
    Delete(delete::DeleteCommand),
    List(list::ListCommand),
    Import(import_export::ImportCommand),
    Export(import_export::ExportCommand),
    Refresh(refresh::RefreshCommand),
}

impl CommandEnum {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::Add(cmd) => cmd.execute(ctx),
            Self::Delete(cmd) => cmd.execute(ctx),
            Self::List(cmd) => cmd.execute(ctx),
            Self::Import(cmd) => cmd.execute(ctx),
            Self::Export(cmd) => cmd.execute(ctx),
            Self::Refresh(cmd) => cmd.execute(ctx),
        }
    }
}
