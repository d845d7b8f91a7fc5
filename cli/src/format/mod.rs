use crate::output::colorize::{Colorize, ColorizeBookmark};
use std::io::Write;
use thumbmark::error::Result;
use thumbmark::models::Bookmark;
use thumbmark::thumbnails::ThumbnailStore;

pub mod json;
pub mod plain;
pub mod yaml;

/// Renders a whole listing as one document
pub trait BookmarkFormat {
    fn render(&self) -> Result<String>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Colored,
}

impl OutputFormat {
    pub fn from_string(format: &str) -> Self {
        match format {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            _ => OutputFormat::Colored,
        }
    }

    pub fn write_bookmarks<W: Write>(
        self,
        out: &mut W,
        records: &[Bookmark],
        thumbs: &ThumbnailStore,
        no_color: bool,
    ) -> Result<()> {
        match self {
            OutputFormat::Json => writeln!(out, "{}", json::JsonBookmarks(records).render()?)?,
            OutputFormat::Yaml => write!(out, "{}", yaml::YamlBookmarks(records).render()?)?,
            OutputFormat::Colored => {
                for b in records {
                    if no_color {
                        write!(out, "{}", plain::PlainBookmark(b, thumbs).render()?)?;
                    } else {
                        write!(out, "{}", ColorizeBookmark(b, thumbs).to_colored())?;
                    }
                }
            }
        }
        Ok(())
    }
}
