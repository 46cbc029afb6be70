//! Configuration commands for managing helpdesk settings.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print a single value
//! - `config set`: Set a configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::Config;
use crate::error::Result;

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;

    let json_output = json!({
        "api_base": config.api_base,
        "effective_api_base": config.api_base(),
        "request_timeout_secs": config.request_timeout_secs,
        "max_retries": config.max_retries(),
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));
    text_output.push_str(&format!("{}: {}\n", "api_base".cyan(), config.api_base));
    if config.api_base() != config.api_base.trim_end_matches('/') {
        text_output.push_str(&format!(
            "  {}\n",
            format!("overridden by HELPDESK_API_BASE: {}", config.api_base()).dimmed()
        ));
    }
    text_output.push_str(&format!(
        "{}: {}\n",
        "request_timeout_secs".cyan(),
        config.request_timeout_secs
    ));
    text_output.push_str(&format!("{}: {}\n", "max_retries".cyan(), config.max_retries()));
    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output_json)
}

/// Print a single configuration value
pub fn cmd_config_get(key: &str, output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let value = config.get(key)?;

    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(value)
    .print(output_json)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": config.get(key)?,
        "success": true,
    }))
    .with_text(format!("Set {} = {}", key.cyan(), config.get(key)?))
    .print(output_json)
}
