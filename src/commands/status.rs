use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, connect};
use crate::display::format_ticket_line;
use crate::error::Result;
use crate::sync::Desk;
use crate::types::TicketStatus;

/// Change a ticket's status, then show it as the reloaded list reports it
pub async fn cmd_status(id: u64, status: TicketStatus, output_json: bool) -> Result<()> {
    let desk = Desk::new(connect()?);
    desk.list().change_status(id, status).await?;

    let reloaded = desk.list().tickets().into_iter().find(|t| t.id == id);

    let mut text = format!("Updated #{} -> {}", id, status.to_string().green());
    if let Some(ticket) = &reloaded {
        text.push('\n');
        text.push_str(&format_ticket_line(ticket));
    }

    CommandOutput::new(json!({
        "id": id,
        "action": "status_changed",
        "new_status": status,
        "ticket": reloaded,
    }))
    .with_text(text)
    .print(output_json)
}
