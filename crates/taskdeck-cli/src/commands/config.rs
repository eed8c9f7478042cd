//! Config command handler

use anyhow::{bail, Result};

use taskdeck_core::Config;

use crate::output::Output;
use crate::ConfigCommands;

/// Show or set configuration values
pub fn handle(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => show(output),
        ConfigCommands::Set { key, value } => set(&key, &value, output),
    }
}

fn show(output: &Output) -> Result<()> {
    let config = Config::load()?;

    output.message(&format!("data_dir:       {}", config.data_dir.display()));
    output.message(&format!(
        "remote_url:     {}",
        config.remote_url.as_deref().unwrap_or("(not set)")
    ));
    output.message(&format!(
        "api_key:        {}",
        if config.api_key.is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    ));
    output.message(&format!("remote_enabled: {}", config.remote_enabled));
    Ok(())
}

fn set(key: &str, value: &str, output: &Output) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "data_dir" => config.data_dir = value.into(),
        "remote_url" => {
            config.remote_url = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        }
        "api_key" => {
            config.api_key = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        }
        "remote_enabled" => {
            config.remote_enabled = value.eq_ignore_ascii_case("true") || value == "1"
        }
        _ => bail!(
            "Unknown config key '{}'. Valid keys: data_dir, remote_url, api_key, remote_enabled",
            key
        ),
    }

    config.save()?;
    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}
