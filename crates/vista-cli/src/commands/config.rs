//! Config command

use anyhow::Result;

pub fn run(config_path: Option<&str>) -> Result<()> {
    let config = super::load_config(config_path, None)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
