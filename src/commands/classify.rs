use serde_json::json;

use super::{CommandOutput, connect};
use crate::display::format_classification;
use crate::error::{DeskError, Result};
use crate::sync::Desk;

/// Ask the server to classify a description without creating anything
pub async fn cmd_classify(description: &str, output_json: bool) -> Result<()> {
    let desk = Desk::new(connect()?);
    let form = desk.form();
    form.set_description(description);

    let classification = form
        .blur_description()
        .await?
        .ok_or_else(|| DeskError::Validation("description is required".to_string()))?;

    CommandOutput::new(json!({
        "suggested_category": classification.suggested_category,
        "suggested_priority": classification.suggested_priority,
    }))
    .with_text(format_classification(&classification))
    .print(output_json)
}
