//! Command-line player for Inkwell stories.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "iw",
    about = "Inkwell: play interactive fiction stories in the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log status updates to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (default: ./inkwell.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a story directory with an inkwell.toml and a stories/ folder
    Init {
        /// Name of the directory to create
        name: String,
    },

    /// Play a story, choosing options by number
    Play {
        /// Story file path or http(s) URL (overrides the configuration)
        #[arg(short, long)]
        story: Option<String>,
    },

    /// Load a story and render its opening without playing it
    Check {
        /// Story file path or http(s) URL (overrides the configuration)
        #[arg(short, long)]
        story: Option<String>,
    },

    /// Launch the full-screen terminal player
    Tui {
        /// Story file path or http(s) URL (overrides the configuration)
        #[arg(short, long)]
        story: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Play { story } => {
            commands::load_config(config, story.as_deref()).and_then(commands::play::run)
        }
        Commands::Check { story } => {
            commands::load_config(config, story.as_deref()).and_then(commands::check::run)
        }
        Commands::Tui { story } => commands::tui::run(config, story.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
