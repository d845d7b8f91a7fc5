//! Filesystem storage for captured thumbnails, one PNG per bookmark id.

use crate::error::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct ThumbnailStore {
    root: PathBuf,
}

impl ThumbnailStore {
    /// The directory is created lazily on the first save
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reference stored in the database for a bookmark id
    pub fn ref_for(id: i64) -> String {
        format!("{}.png", id)
    }

    pub fn path_for(&self, id: i64) -> PathBuf {
        self.root.join(Self::ref_for(id))
    }

    /// Absolute path for a reference read back from the database
    pub fn resolve(&self, thumbnail_ref: &str) -> PathBuf {
        self.root.join(thumbnail_ref)
    }

    pub fn exists(&self, id: i64) -> bool {
        self.path_for(id).is_file()
    }

    /// Write the image for `id`, replacing any previous capture.
    ///
    /// Bytes go to a temp file in the same directory and are renamed into
    /// place, so a reader never sees a partially written image.
    pub fn save(&self, id: i64, bytes: &[u8]) -> Result<String> {
        fs::create_dir_all(&self.root)?;

        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(id)).map_err(|e| e.error)?;

        log::debug!("Saved thumbnail for bookmark {} ({} bytes)", id, bytes.len());
        Ok(Self::ref_for(id))
    }

    /// Remove the image for `id`. A missing file is not an error.
    pub fn remove(&self, id: i64) -> Result<bool> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
