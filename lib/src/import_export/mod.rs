pub mod export;
pub mod import;
pub mod netscape;

// Re-export main functions for convenience
pub use export::{export_bookmarks, export_to_path, ExportFile};
pub use import::{
    import_bookmarks, import_bookmarks_with_progress, import_entries_with_progress, ImportSummary,
};
pub use netscape::InterchangeEntry;
