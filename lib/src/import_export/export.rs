use super::netscape;
use crate::db::BookmarkDb;
use crate::error::Result;
use std::fs;
use std::path::Path;

pub const EXPORT_FILENAME: &str = "bookmarks.html";
pub const EXPORT_CONTENT_TYPE: &str = "text/html";

/// A rendered export, ready to be offered as a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// Number of bookmarks in the document
    pub count: usize,
}

/// Render every stored bookmark as a Netscape bookmark file
pub fn export_bookmarks(db: &BookmarkDb) -> Result<ExportFile> {
    let records = db.list_all()?;
    let body = netscape::encode(&records);

    Ok(ExportFile {
        filename: EXPORT_FILENAME,
        content_type: EXPORT_CONTENT_TYPE,
        body,
        count: records.len(),
    })
}

/// Export to a file on disk, returning the number of bookmarks written
pub fn export_to_path(db: &BookmarkDb, path: &Path) -> Result<usize> {
    let export = export_bookmarks(db)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &export.body)?;
    log::info!(
        "Wrote {} bookmark(s) to {} ({})",
        export.count,
        path.display(),
        export.content_type
    );
    Ok(export.count)
}
