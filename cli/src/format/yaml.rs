use super::BookmarkFormat;
use thumbmark::error::Result;
use thumbmark::models::Bookmark;

pub struct YamlBookmarks<'a>(pub &'a [Bookmark]);

impl<'a> BookmarkFormat for YamlBookmarks<'a> {
    fn render(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self.0)?)
    }
}
