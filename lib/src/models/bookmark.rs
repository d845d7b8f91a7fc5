use serde::{Deserialize, Serialize};

/// A stored bookmark
///
/// `thumbnail` is `None` until an image has been captured and its reference
/// backfilled. A row can stay in that state permanently when capture or
/// backfill failed; `operations::refresh_missing_thumbnails` picks those up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub url: String,
    pub thumbnail: Option<String>,
}

impl Bookmark {
    pub fn new(id: i64, url: String, thumbnail: Option<String>) -> Self {
        Self { id, url, thumbnail }
    }

    /// Build from the raw column value, where `''` means no thumbnail
    pub fn from_row(id: i64, url: String, thumbnail: String) -> Self {
        let thumbnail = if thumbnail.is_empty() {
            None
        } else {
            Some(thumbnail)
        };
        Self { id, url, thumbnail }
    }

    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail.is_some()
    }
}
