use std::fs;
use std::path::Path;

use iw_core::DEFAULT_STORY_PATH;

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{name}' already exists"));
    }

    fs::create_dir_all(dir.join("stories"))
        .map_err(|e| format!("cannot create directory: {e}"))?;

    let config = format!(
        r#"# Inkwell page configuration

# Story document to play: a path relative to this directory or an http(s) URL.
story = "{DEFAULT_STORY_PATH}"

# Seconds before an HTTP fetch is abandoned.
fetch_timeout_secs = 30
"#
    );

    fs::write(dir.join("inkwell.toml"), config)
        .map_err(|e| format!("cannot write inkwell.toml: {e}"))?;

    println!("Created story directory '{name}' in {name}/");
    println!("  inkwell.toml  page configuration");
    println!("  stories/      put compiled story JSON here");
    println!();
    println!("Get started:");
    println!("  cd {name}");
    println!("  # Copy your compiled story to {DEFAULT_STORY_PATH}");
    println!("  iw check      # Load the story and render its opening");
    println!("  iw play       # Play it");

    Ok(())
}
