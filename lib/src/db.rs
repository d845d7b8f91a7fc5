use crate::error::{Result, ThumbmarkError};
use crate::models::bookmark::Bookmark;
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};

pub struct BookmarkDb {
    conn: Connection,
    db_path: PathBuf,
}

/// True when the error is a violation of a UNIQUE constraint
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl BookmarkDb {
    pub fn init_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        db.setup_tables()?;
        Ok(db)
    }

    pub fn init(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let db = Self {
            conn,
            db_path: db_path.to_path_buf(),
        };
        db.setup_tables()?;
        Ok(db)
    }

    /// Open an existing database without creating tables
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Ok(Self {
            conn,
            db_path: db_path.to_path_buf(),
        })
    }

    /// Get the database file path
    pub fn get_path(&self) -> &Path {
        &self.db_path
    }

    fn setup_tables(&self) -> Result<()> {
        // AUTOINCREMENT keeps ids from being reused after deletes
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS bookmarks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT NOT NULL UNIQUE,
                thumbnail TEXT NOT NULL DEFAULT ''
            )",
            [],
        )?;
        Ok(())
    }

    /// Insert a new bookmark with an empty thumbnail reference.
    ///
    /// Uniqueness is left to the `UNIQUE` constraint so that two writers
    /// racing on the same URL cannot both succeed.
    pub fn insert(&self, url: &str) -> Result<i64> {
        match self.conn.execute(
            "INSERT INTO bookmarks (url, thumbnail) VALUES (?1, '')",
            [url],
        ) {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(e) if is_unique_violation(&e) => Err(ThumbmarkError::Duplicate(url.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    pub fn update_thumbnail(&self, id: i64, thumbnail: &str) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE bookmarks SET thumbnail = ?1 WHERE id = ?2",
            (thumbnail, id),
        )?;
        if changed == 0 {
            return Err(ThumbmarkError::NotFound(id));
        }
        Ok(())
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>> {
        let bookmark = self
            .conn
            .query_row(
                "SELECT id, url, thumbnail FROM bookmarks WHERE id = ?1",
                [id],
                |row| Ok(Bookmark::from_row(row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        Ok(bookmark)
    }

    pub fn list_all(&self) -> Result<Vec<Bookmark>> {
        self.query_bookmarks("SELECT id, url, thumbnail FROM bookmarks ORDER BY id")
    }

    /// Bookmarks whose thumbnail was never backfilled
    pub fn list_missing_thumbnails(&self) -> Result<Vec<Bookmark>> {
        self.query_bookmarks(
            "SELECT id, url, thumbnail FROM bookmarks WHERE thumbnail = '' ORDER BY id",
        )
    }

    fn query_bookmarks(&self, sql: &str) -> Result<Vec<Bookmark>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(Bookmark::from_row(row.get(0)?, row.get(1)?, row.get(2)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Delete a bookmark. Missing ids are not an error; the return value
    /// reports whether a row was actually removed.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", [id])?;
        Ok(changed > 0)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
