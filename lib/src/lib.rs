pub mod capture;
pub mod config;
pub mod db;
pub mod error;
pub mod import_export;
pub mod models;
pub mod operations;
pub mod thumbnails;
pub mod utils;

// Re-export error types for convenience
pub use error::ThumbmarkError;
