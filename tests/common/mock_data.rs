//! Mock data builders for creating test tickets.

use helpdesk::types::{Ticket, TicketCategory, TicketPriority, TicketStatus};
use serde_json::{Value, json};

/// Builder for creating test tickets
pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    /// Create a new ticket builder with the given ID
    pub fn new(id: u64) -> Self {
        Self {
            ticket: Ticket {
                id,
                title: format!("Ticket {id}"),
                description: format!("Description of ticket {id}"),
                category: TicketCategory::General,
                priority: TicketPriority::Low,
                status: TicketStatus::Open,
                created_at: "2026-02-19T09:30:00Z".to_string(),
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.ticket.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.ticket.description = description.to_string();
        self
    }

    pub fn category(mut self, category: TicketCategory) -> Self {
        self.ticket.category = category;
        self
    }

    pub fn priority(mut self, priority: TicketPriority) -> Self {
        self.ticket.priority = priority;
        self
    }

    pub fn status(mut self, status: TicketStatus) -> Self {
        self.ticket.status = status;
        self
    }

    pub fn build(self) -> Ticket {
        self.ticket
    }
}

/// Three tickets covering every status and a spread of categories
pub fn sample_tickets() -> Vec<Ticket> {
    vec![
        TicketBuilder::new(1)
            .title("Login Issue")
            .description("Cannot login to account")
            .category(TicketCategory::Technical)
            .priority(TicketPriority::High)
            .build(),
        TicketBuilder::new(5)
            .title("Double charge")
            .description("Charged twice for March")
            .category(TicketCategory::Billing)
            .priority(TicketPriority::Medium)
            .build(),
        TicketBuilder::new(7)
            .title("Close my account")
            .category(TicketCategory::Account)
            .status(TicketStatus::Closed)
            .build(),
    ]
}

/// Stats body as the server sends it
pub fn sample_stats_json() -> Value {
    json!({
        "total_tickets": 3,
        "open_tickets": 2,
        "avg_tickets_per_day": 1.5,
        "priority_breakdown": {"high": 1, "medium": 1, "low": 1},
        "category_breakdown": {"technical": 1, "billing": 1, "account": 1}
    })
}
