mod classify;
mod config;
mod create;
mod ls;
mod rm;
mod show;
mod stats;
mod status;

pub use classify::cmd_classify;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use create::{CreateOptions, cmd_create};
pub use ls::{LsOptions, cmd_ls};
pub use rm::cmd_rm;
pub use show::cmd_show;
pub use stats::cmd_stats;
pub use status::cmd_status;

use std::sync::Arc;

use serde_json::Value;

use crate::api::HttpTicketApi;
use crate::config::Config;
use crate::error::Result;

/// Output of a command: always a JSON value, optionally with a text rendering
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        CommandOutput { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print JSON when requested (or when there is no text form), text otherwise
    pub fn print(self, output_json: bool) -> Result<()> {
        match self.text {
            Some(text) if !output_json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build the HTTP client from the on-disk configuration
pub(crate) fn connect() -> Result<Arc<HttpTicketApi>> {
    let config = Config::load()?;
    let api = HttpTicketApi::from_config(&config)?;
    tracing::debug!(base = api.base(), "using ticket API");
    Ok(Arc::new(api))
}
