use super::netscape::{self, InterchangeEntry};
use crate::capture::Capture;
use crate::db::BookmarkDb;
use crate::error::{Result, ThumbmarkError};
use crate::operations;
use crate::thumbnails::ThumbnailStore;

/// Outcome of a batch import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Entries decoded from the document
    pub total: usize,
    /// Entries with both a row and a thumbnail persisted
    pub imported: usize,
    /// Entries whose URL was already stored
    pub duplicates: usize,
    /// Entries that failed capture, insert or backfill
    pub failed: usize,
}

enum EntryOutcome {
    Imported,
    Duplicate,
    Failed,
}

/// Import an interchange document from memory
pub fn import_bookmarks(
    db: &BookmarkDb,
    thumbs: &ThumbnailStore,
    capture: &dyn Capture,
    bytes: &[u8],
) -> Result<ImportSummary> {
    import_bookmarks_with_progress(db, thumbs, capture, bytes, |_, _, _| {})
}

/// Decode `bytes` and import every entry in order.
///
/// A malformed document aborts before anything is stored.
pub fn import_bookmarks_with_progress<F>(
    db: &BookmarkDb,
    thumbs: &ThumbnailStore,
    capture: &dyn Capture,
    bytes: &[u8],
    on_progress: F,
) -> Result<ImportSummary>
where
    F: FnMut(usize, usize, &str),
{
    let entries = netscape::decode(bytes)?;
    import_entries_with_progress(db, thumbs, capture, &entries, on_progress)
}

/// Import already decoded entries in order.
///
/// The batch never fails: each entry either fully succeeds or is logged and
/// skipped. `on_progress` receives `(index, total, url)` before each entry.
pub fn import_entries_with_progress<F>(
    db: &BookmarkDb,
    thumbs: &ThumbnailStore,
    capture: &dyn Capture,
    entries: &[InterchangeEntry],
    mut on_progress: F,
) -> Result<ImportSummary>
where
    F: FnMut(usize, usize, &str),
{
    let mut summary = ImportSummary {
        total: entries.len(),
        ..ImportSummary::default()
    };

    log::info!("Importing {} bookmark(s)", summary.total);

    for (index, entry) in entries.iter().enumerate() {
        on_progress(index + 1, summary.total, &entry.url);

        if !entry.folders.is_empty() {
            log::debug!("{} is in folder {}", entry.url, entry.folders.join("/"));
        }

        match import_entry(db, thumbs, capture, &entry.url) {
            EntryOutcome::Imported => summary.imported += 1,
            EntryOutcome::Duplicate => summary.duplicates += 1,
            EntryOutcome::Failed => summary.failed += 1,
        }
    }

    log::info!(
        "Imported {} of {} bookmark(s) ({} duplicate, {} failed)",
        summary.imported,
        summary.total,
        summary.duplicates,
        summary.failed
    );
    Ok(summary)
}

fn import_entry(
    db: &BookmarkDb,
    thumbs: &ThumbnailStore,
    capture: &dyn Capture,
    url: &str,
) -> EntryOutcome {
    let screenshot = match capture.capture(url) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Failed to capture screenshot for {}: {}", url, e);
            return EntryOutcome::Failed;
        }
    };

    let id = match db.insert(url) {
        Ok(id) => id,
        Err(ThumbmarkError::Duplicate(_)) => {
            log::info!("URL already exists: {}", url);
            return EntryOutcome::Duplicate;
        }
        Err(e) => {
            log::warn!("Failed to add bookmark for {}: {}", url, e);
            return EntryOutcome::Failed;
        }
    };

    // the row stays, with an empty thumbnail, if this step fails
    match operations::store_thumbnail(db, thumbs, id, &screenshot) {
        Ok(_) => EntryOutcome::Imported,
        Err(e) => {
            log::warn!("Failed to save thumbnail for {}: {}", url, e);
            EntryOutcome::Failed
        }
    }
}
