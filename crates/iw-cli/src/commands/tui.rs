//! Launch the iw-tui standalone binary.

use std::path::Path;

/// Launch the iw-tui standalone binary with the same configuration and story.
pub fn run(config: Option<&Path>, story: Option<&str>) -> Result<(), String> {
    let mut command = std::process::Command::new("iw-tui");
    if let Some(file) = config {
        command.arg("--config").arg(file);
    }
    if let Some(location) = story {
        command.arg("--story").arg(location);
    }

    match command.status() {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => Err(format!("iw-tui exited with {s}")),
        Err(_) => {
            Err("iw-tui binary not found. Install with: cargo install --path crates/iw-tui".into())
        }
    }
}
