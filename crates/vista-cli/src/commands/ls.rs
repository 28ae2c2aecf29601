//! Ls command

use anyhow::{Context, Result};
use vista_gui::PanelTree;
use vista_overlay::{DirectoryBrowser, StdFileSystem};

pub fn run(path: Option<&str>, format: &str, config_path: Option<&str>) -> Result<()> {
    let config = super::load_config(config_path, path)?;

    // Offscreen tree; nothing is shown
    let mut ui = PanelTree::new(config.browser.size());
    let browser =
        DirectoryBrowser::new(&mut ui, StdFileSystem, &config).context("Failed to list directory")?;

    match format {
        "text" => {
            println!("{}", browser.current_path().display());
            for entry in browser.entries() {
                let suffix = if entry.is_dir() { "/" } else { "" };
                println!("  {}{}", entry.name, suffix);
            }
        }
        "json" => {
            let output = serde_json::json!({
                "path": browser.current_path().display().to_string(),
                "entries": browser.entries(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }

    Ok(())
}
