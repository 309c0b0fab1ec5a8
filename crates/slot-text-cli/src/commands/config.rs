use std::path::Path;

use anyhow::{bail, Result};

use slot_text_core::AppConfig;

/// Print the config file location
pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

/// Print the effective configuration as TOML
pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write a default config file
pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    write_default(&path, force)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists at {}\nUse --force to overwrite it.",
            path.display()
        );
    }
    AppConfig::default().save_to(path)?;
    tracing::info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}
