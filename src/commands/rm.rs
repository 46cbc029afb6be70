use serde_json::json;

use super::{CommandOutput, connect};
use crate::error::Result;
use crate::sync::Desk;

/// Delete a ticket
pub async fn cmd_rm(id: u64, output_json: bool) -> Result<()> {
    let desk = Desk::new(connect()?);
    desk.list().delete(id).await?;
    let remaining = desk.list().tickets().len();

    CommandOutput::new(json!({
        "id": id,
        "action": "deleted",
        "remaining": remaining,
    }))
    .with_text(format!("Deleted #{id} ({remaining} ticket(s) remaining)"))
    .print(output_json)
}
