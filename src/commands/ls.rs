use owo_colors::OwoColorize;

use super::{CommandOutput, connect};
use crate::display::format_ticket_table;
use crate::error::Result;
use crate::query::FilterState;
use crate::sync::Desk;
use crate::types::{TicketCategory, TicketPriority, TicketStatus};

/// Filters accepted by `ls`
#[derive(Debug, Default)]
pub struct LsOptions {
    pub search: Option<String>,
    pub status: Option<TicketStatus>,
    pub category: Option<TicketCategory>,
    pub priority: Option<TicketPriority>,
    pub json: bool,
}

impl LsOptions {
    fn filter(&self) -> FilterState {
        FilterState::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_status(self.status)
            .with_category(self.category)
            .with_priority(self.priority)
    }
}

/// List tickets matching the filters
pub async fn cmd_ls(options: LsOptions) -> Result<()> {
    let desk = Desk::with_filter(connect()?, options.filter());
    desk.list().mount().await?;

    let tickets = desk.list().tickets();
    let text = if tickets.is_empty() {
        "No tickets found".dimmed().to_string()
    } else {
        format!(
            "{}\n{} ticket(s)",
            format_ticket_table(&tickets),
            tickets.len()
        )
    };

    CommandOutput::new(serde_json::to_value(&tickets)?)
        .with_text(text)
        .print(options.json)
}
