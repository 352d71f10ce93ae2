//! Init command handler

use std::path::Path;

use crate::config::Config;

pub fn cmd_init(path: Option<&Path>) -> anyhow::Result<()> {
    let default_path = Config::default_config_path();
    let path = path.unwrap_or(default_path.as_path());

    if Config::create_default_if_missing(path)? {
        println!("Created default config file: {}", path.display());
    } else {
        println!("Config file already exists: {}", path.display());
    }

    Ok(())
}
