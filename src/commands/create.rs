use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, connect};
use crate::display::format_ticket_detail;
use crate::error::Result;
use crate::sync::Desk;
use crate::types::{TicketCategory, TicketPriority};

/// Options for creating a new ticket
#[derive(Debug)]
pub struct CreateOptions {
    pub title: String,
    pub description: String,
    pub category: Option<TicketCategory>,
    pub priority: Option<TicketPriority>,
    /// Skip the classification request
    pub no_classify: bool,
    pub json: bool,
}

impl CreateOptions {
    /// Classification is only useful when a field was left for the server to pick
    fn wants_classification(&self) -> bool {
        !self.no_classify && (self.category.is_none() || self.priority.is_none())
    }
}

/// Create a ticket through the form controller
pub async fn cmd_create(options: CreateOptions) -> Result<()> {
    let desk = Desk::new(connect()?);
    let form = desk.form();

    form.set_title(options.title.as_str());
    form.set_description(options.description.as_str());

    let mut classification = None;
    if options.wants_classification() {
        match form.blur_description().await {
            Ok(suggested) => classification = suggested,
            // Not fatal: the defaults still make a valid ticket
            Err(e) => eprintln!("{} could not classify ticket: {e}", "Warning:".yellow()),
        }
    }

    // Explicit flags win over suggestions
    if let Some(category) = options.category {
        form.set_category(category);
    }
    if let Some(priority) = options.priority {
        form.set_priority(priority);
    }

    let ticket = form.submit().await?;

    CommandOutput::new(json!({
        "action": "created",
        "ticket": ticket,
        "classification": classification,
    }))
    .with_text(format!(
        "{} #{}\n\n{}",
        "Created ticket".green(),
        ticket.id,
        format_ticket_detail(&ticket)
    ))
    .print(options.json)
}
