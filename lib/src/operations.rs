use crate::capture::Capture;
use crate::db::BookmarkDb;
use crate::error::{Result, ThumbmarkError};
use crate::models::bookmark::Bookmark;
use crate::thumbnails::ThumbnailStore;
use std::ops::RangeInclusive;

/// Outcome of a thumbnail refresh pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub attempted: usize,
    pub refreshed: usize,
    pub failed: usize,
}

/// Save `bytes` as the thumbnail of `id` and backfill its reference.
///
/// The image is removed again when the row is gone by the time the
/// reference is written.
pub fn store_thumbnail(
    db: &BookmarkDb,
    thumbs: &ThumbnailStore,
    id: i64,
    bytes: &[u8],
) -> Result<String> {
    let reference = thumbs.save(id, bytes)?;
    if let Err(e) = db.update_thumbnail(id, &reference) {
        if let Err(cleanup) = thumbs.remove(id) {
            log::warn!("Failed to remove orphaned thumbnail {}: {}", reference, cleanup);
        }
        return Err(e);
    }
    Ok(reference)
}

/// Add a single bookmark with its thumbnail.
///
/// Every failure is surfaced. A failed capture or save rolls the row back,
/// so the store either gains a complete bookmark or nothing.
pub fn add_bookmark(
    db: &BookmarkDb,
    thumbs: &ThumbnailStore,
    capture: &dyn Capture,
    url: &str,
) -> Result<Bookmark> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ThumbmarkError::Validation("URL must not be empty".to_string()));
    }

    let id = db.insert(url)?;

    let reference = match capture
        .capture(url)
        .and_then(|bytes| store_thumbnail(db, thumbs, id, &bytes))
    {
        Ok(reference) => reference,
        Err(e) => {
            if let Err(rollback) = db.delete(id) {
                log::warn!("Failed to roll back bookmark {}: {}", id, rollback);
            }
            return Err(e);
        }
    };

    log::info!("Added bookmark {} for {}", id, url);
    Ok(Bookmark::new(id, url.to_string(), Some(reference)))
}

/// Delete a bookmark and its thumbnail. Returns whether a row was removed.
pub fn delete_bookmark(db: &BookmarkDb, thumbs: &ThumbnailStore, id: i64) -> Result<bool> {
    let removed = db.delete(id)?;
    if thumbs.remove(id)? {
        log::debug!("Removed thumbnail for bookmark {}", id);
    }
    if removed {
        log::info!("Deleted bookmark {}", id);
    }
    Ok(removed)
}

/// Delete several bookmarks, returning how many rows were removed
pub fn delete_bookmarks(db: &BookmarkDb, thumbs: &ThumbnailStore, ids: &[i64]) -> Result<usize> {
    let mut count = 0;
    for id in ids {
        if delete_bookmark(db, thumbs, *id)? {
            count += 1;
        }
    }
    Ok(count)
}

pub fn list_bookmarks(db: &BookmarkDb) -> Result<Vec<Bookmark>> {
    db.list_all()
}

/// Re-capture every bookmark whose thumbnail reference is empty.
///
/// Failures are logged per bookmark and never abort the pass.
pub fn refresh_missing_thumbnails<F>(
    db: &BookmarkDb,
    thumbs: &ThumbnailStore,
    capture: &dyn Capture,
    mut on_progress: F,
) -> Result<RefreshSummary>
where
    F: FnMut(usize, usize, &str),
{
    let pending = db.list_missing_thumbnails()?;
    let mut summary = RefreshSummary {
        attempted: pending.len(),
        ..RefreshSummary::default()
    };

    for (index, bookmark) in pending.iter().enumerate() {
        on_progress(index + 1, summary.attempted, &bookmark.url);

        let result = capture
            .capture(&bookmark.url)
            .and_then(|bytes| store_thumbnail(db, thumbs, bookmark.id, &bytes));
        match result {
            Ok(_) => summary.refreshed += 1,
            Err(e) => {
                log::warn!("Failed to refresh thumbnail for {}: {}", bookmark.url, e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Parse bookmark id selections. Accepts single ids ("5") and inclusive
/// ranges ("1-5"). Ranges stay unexpanded, so "1-9223372036854775807" is
/// as cheap as "1".
pub fn parse_id_ranges(inputs: &[String]) -> Result<Vec<RangeInclusive<i64>>> {
    let mut ranges = Vec::new();

    for input in inputs {
        for token in input.split_whitespace() {
            if let Some((start, end)) = token.split_once('-') {
                let start = parse_id(start, token)?;
                let end = parse_id(end, token)?;
                if start > end {
                    return Err(ThumbmarkError::Validation(format!(
                        "Invalid range: {}",
                        token
                    )));
                }
                ranges.push(start..=end);
            } else {
                let id = parse_id(token, token)?;
                ranges.push(id..=id);
            }
        }
    }

    Ok(ranges)
}

/// Resolve id selections against the store, returning the bookmarks that
/// exist in ascending id order
pub fn select_bookmarks(db: &BookmarkDb, inputs: &[String]) -> Result<Vec<Bookmark>> {
    let ranges = parse_id_ranges(inputs)?;
    if ranges.is_empty() {
        return Ok(Vec::new());
    }

    let selected = db
        .list_all()?
        .into_iter()
        .filter(|b| ranges.iter().any(|r| r.contains(&b.id)))
        .collect();
    Ok(selected)
}

fn parse_id(value: &str, token: &str) -> Result<i64> {
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ThumbmarkError::Validation(format!("Invalid ID: {}", token))),
    }
}
