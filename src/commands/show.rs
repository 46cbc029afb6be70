use super::{CommandOutput, connect};
use crate::api::TicketApi;
use crate::display::format_ticket_detail;
use crate::error::Result;

/// Display a single ticket
pub async fn cmd_show(id: u64, output_json: bool) -> Result<()> {
    let ticket = connect()?.get_ticket(id).await?;

    CommandOutput::new(serde_json::to_value(&ticket)?)
        .with_text(format_ticket_detail(&ticket))
        .print(output_json)
}
