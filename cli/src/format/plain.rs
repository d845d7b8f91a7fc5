use super::BookmarkFormat;
use thumbmark::error::Result;
use thumbmark::models::Bookmark;
use thumbmark::thumbnails::ThumbnailStore;

pub struct PlainBookmark<'a>(pub &'a Bookmark, pub &'a ThumbnailStore);

impl<'a> BookmarkFormat for PlainBookmark<'a> {
    fn render(&self) -> Result<String> {
        let id = self.0.id.to_string();
        let padding = id.len() + 3;
        let thumbnail = match &self.0.thumbnail {
            Some(reference) => self.1.resolve(reference).display().to_string(),
            None => "(no thumbnail)".to_string(),
        };
        Ok(format!(
            "{}. {}\n{:>padding$} {}\n",
            id, self.0.url, "@", thumbnail
        ))
    }
}
