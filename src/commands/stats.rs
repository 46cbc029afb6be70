use owo_colors::OwoColorize;

use super::{CommandOutput, connect};
use crate::display::format_stats;
use crate::error::Result;
use crate::sync::Desk;

/// Show aggregate ticket statistics
pub async fn cmd_stats(output_json: bool) -> Result<()> {
    let desk = Desk::new(connect()?);
    desk.stats().mount().await?;

    match desk.stats().stats() {
        Some(stats) => CommandOutput::new(serde_json::to_value(&stats)?)
            .with_text(format_stats(&stats))
            .print(output_json),
        None => CommandOutput::new(serde_json::Value::Null)
            .with_text("Statistics unavailable".dimmed().to_string())
            .print(output_json),
    }
}
