//! Standalone TUI binary for Inkwell.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::Parser;
use iw_core::StorySource;
use iw_runner::PageConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "iw-tui",
    about = "Full-screen terminal player for Inkwell stories",
    version
)]
struct Args {
    /// Story file path or http(s) URL (overrides the configuration)
    #[arg(short, long)]
    story: Option<String>,

    /// Configuration file (default: ./inkwell.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file; the screen itself is never logged to
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file
        && let Err(e) = init_logging(path)
    {
        eprintln!("error: {e}");
        process::exit(1);
    }

    let config = match PageConfig::load(args.config.as_deref()) {
        Ok(config) => match args.story.as_deref() {
            Some(location) => config.with_story(StorySource::parse(location)),
            None => config,
        },
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let result = iw_tui::app::TuiApp::new(config, iw_core::available_engine())
        .and_then(iw_tui::terminal::run);

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Send logs to `path`, filtered by `RUST_LOG` (default `info`).
fn init_logging(path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("cannot open log file: {e}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
