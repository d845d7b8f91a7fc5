/// Error type for the thumbmark library
///
/// Single-bookmark operations surface these directly; the import pipeline
/// logs per-entry variants and only propagates `Format`.
#[derive(Debug, thiserror::Error)]
pub enum ThumbmarkError {
    /// Missing or empty required input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// URL uniqueness violation
    #[error("This URL is already bookmarked: {0}")]
    Duplicate(String),

    /// Headless rendering or navigation failure
    #[error("Failed to capture screenshot: {0}")]
    Capture(String),

    /// Malformed bookmark interchange document
    #[error("Failed to parse Netscape bookmark file: {0}")]
    Format(String),

    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation on a bookmark id that does not exist
    #[error("Bookmark with ID {0} not found")]
    NotFound(i64),

    /// Database-related errors (SQLite)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias using ThumbmarkError
pub type Result<T> = std::result::Result<T, ThumbmarkError>;

impl From<String> for ThumbmarkError {
    fn from(s: String) -> Self {
        ThumbmarkError::Other(s)
    }
}

impl From<&str> for ThumbmarkError {
    fn from(s: &str) -> Self {
        ThumbmarkError::Other(s.to_string())
    }
}

impl From<serde_yaml::Error> for ThumbmarkError {
    fn from(err: serde_yaml::Error) -> Self {
        ThumbmarkError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for ThumbmarkError {
    fn from(err: serde_json::Error) -> Self {
        ThumbmarkError::Json(err.to_string())
    }
}

impl ThumbmarkError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ThumbmarkError::Duplicate(_))
    }
}
