use crate::commands::{
    add::AddCommand, delete::DeleteCommand, import_export::ExportCommand,
    import_export::ImportCommand, list::ListCommand, refresh::RefreshCommand, AppContext,
    CommandEnum,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thumbmark::config::Config;
use thumbmark::db::BookmarkDb;
use thumbmark::error::Result;
use thumbmark::import_export::export::EXPORT_FILENAME;
use thumbmark::thumbnails::ThumbnailStore;

pub fn get_exe_name() -> &'static str {
    static EXE_NAME: OnceLock<String> = OnceLock::new();
    EXE_NAME.get_or_init(|| {
        std::env::args()
            .next()
            .as_ref()
            .map(std::path::Path::new)
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "thumbmark".to_string())
    })
}

#[derive(Parser)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Optional custom database file path
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Optional custom thumbnail directory
    #[arg(long)]
    pub thumbnails: Option<PathBuf>,

    /// Optional custom configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable color output
    #[arg(long)]
    pub nc: bool,

    /// Show debug information
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,

    /// Output format for listings (json, yaml)
    #[arg(short = 'f', long)]
    pub format: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new bookmark and capture its thumbnail
    Add {
        /// URL to bookmark
        url: String,
    },

    /// Delete bookmark(s) and their thumbnails
    Delete {
        /// Bookmark ids or ranges (e.g., 1-5)
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        force: bool,
    },

    /// List stored bookmarks
    List {
        /// Only show bookmarks without a thumbnail
        #[arg(long)]
        missing: bool,
    },

    /// Import bookmarks from a Netscape bookmark file
    Import {
        /// File path to import from
        file: PathBuf,
    },

    /// Export bookmarks to a Netscape bookmark file
    Export {
        /// File path to export to
        #[arg(default_value = EXPORT_FILENAME)]
        file: PathBuf,
    },

    /// Capture thumbnails for bookmarks that have none
    Refresh,
}

/// Translate parsed arguments into a command object
pub fn build_command(cli: &Cli) -> CommandEnum {
    match &cli.command {
        Some(Commands::Add { url }) => CommandEnum::Add(AddCommand { url: url.clone() }),
        Some(Commands::Delete { ids, force }) => CommandEnum::Delete(DeleteCommand {
            ids: ids.clone(),
            force: *force,
        }),
        Some(Commands::List { missing }) => CommandEnum::List(ListCommand {
            missing: *missing,
            format: cli.format.clone(),
            nc: cli.nc,
        }),
        Some(Commands::Import { file }) => {
            CommandEnum::Import(ImportCommand { file: file.clone() })
        }
        Some(Commands::Export { file }) => {
            CommandEnum::Export(ExportCommand { file: file.clone() })
        }
        Some(Commands::Refresh) => CommandEnum::Refresh(RefreshCommand),
        None => CommandEnum::List(ListCommand {
            missing: false,
            format: cli.format.clone(),
            nc: cli.nc,
        }),
    }
}

pub fn handle_args(
    cli: Cli,
    db: &BookmarkDb,
    db_path: &Path,
    config: &Config,
    thumbs: &ThumbnailStore,
) -> Result<()> {
    let ctx = AppContext {
        db,
        config,
        db_path,
        thumbs,
        capture: None,
    };

    build_command(&cli).execute(&ctx)
}
