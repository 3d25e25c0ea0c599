pub mod check;
pub mod init;
pub mod play;
pub mod tui;

use std::path::Path;

use colored::Colorize;
use iw_core::StorySource;
use iw_runner::{PageConfig, PageSurface, TextBlock};
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the page configuration, letting `--story` override it.
pub fn load_config(file: Option<&Path>, story: Option<&str>) -> Result<PageConfig, String> {
    let config = PageConfig::load(file).map_err(|e| e.to_string())?;
    Ok(match story {
        Some(location) => config.with_story(StorySource::parse(location)),
        None => config,
    })
}

/// Print the text and choice regions of a page.
fn print_page(surface: &PageSurface) {
    for block in surface.text() {
        match block {
            TextBlock::Paragraph(text) => println!("{text}"),
            TextBlock::Warning(text) => println!("{}", text.yellow()),
            TextBlock::EndMarker(text) => println!("\n  {}", format!("~ {text} ~").bold().green()),
            TextBlock::Error(text) => println!("{}", text.red()),
            TextBlock::Help(help) => {
                println!("\n{}", help.heading.bold());
                for (i, step) in help.steps.iter().enumerate() {
                    println!("  {}. {step}", i + 1);
                }
                println!("\n  [{}] press r", help.reload_label);
            }
        }
    }

    if !surface.choices().is_empty() {
        println!();
        for choice in surface.choices() {
            println!("  {}", choice.to_string().cyan());
        }
    }
    println!();
}
