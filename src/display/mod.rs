pub mod cli_formatting;
pub mod data_formatting;

pub use cli_formatting::*;
pub use data_formatting::*;

use owo_colors::OwoColorize;

use crate::types::StatsSnapshot;

/// Coloured statistics block for the `stats` command
pub fn format_stats(stats: &StatsSnapshot) -> String {
    format!("{}\n\n{}", "Ticket statistics".cyan().bold(), format_stats_plain(stats))
}
