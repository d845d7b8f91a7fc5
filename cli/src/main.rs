mod capture_ui;
mod cli;
mod commands;
mod format;
mod output;

use clap::Parser;
use thumbmark::{config, db, error::Result, thumbnails::ThumbnailStore, utils};

fn main() {
    let args = cli::Cli::parse();

    // Initialize logger; RUST_LOG still wins over --debug
    let default_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: cli::Cli) -> Result<()> {
    if args.version {
        println!("{} {}", cli::get_exe_name(), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let db_path = if let Some(path) = &args.db {
        path.clone()
    } else {
        utils::get_default_datadir().join("bookmarks.db")
    };

    let datadir = db_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(utils::get_default_datadir);
    std::fs::create_dir_all(&datadir)?;

    let db = db::BookmarkDb::init(&db_path)?;

    // Load configuration
    let cfg = if let Some(config_path) = &args.config {
        config::Config::load_from_path(config_path)?
    } else {
        config::Config::load()
    };

    let thumbnails_dir = args
        .thumbnails
        .clone()
        .unwrap_or_else(|| cfg.thumbnails_dir_or(&datadir));
    let thumbs = ThumbnailStore::new(thumbnails_dir);

    log::debug!(
        "Using database {} and thumbnails in {}",
        db_path.display(),
        thumbs.root().display()
    );

    cli::handle_args(args, &db, &db_path, &cfg, &thumbs)
}
