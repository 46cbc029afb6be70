use owo_colors::OwoColorize;

use crate::types::{Ticket, TicketPriority, TicketStatus};

use super::data_formatting::{format_created_at, truncate_title};

/// Format a ticket for single-line display with colors
pub fn format_ticket_line(ticket: &Ticket) -> String {
    let id = format!("#{:<6}", ticket.id);
    format!(
        "{} {}{} - {}",
        id.cyan(),
        format_priority_colored(ticket.priority),
        format_status_colored(ticket.status),
        truncate_title(&ticket.title, 72)
    )
}

/// Multi-line detail view used by `show` and `create`
pub fn format_ticket_detail(ticket: &Ticket) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        format!("#{}", ticket.id).cyan().bold(),
        ticket.title.bold()
    ));
    out.push_str(&format!(
        "{} {}  {} {}  {} {}\n",
        "status:".dimmed(),
        format_status_colored(ticket.status),
        "priority:".dimmed(),
        format_priority_colored(ticket.priority),
        "category:".dimmed(),
        ticket.category
    ));
    out.push_str(&format!(
        "{} {}\n",
        "created:".dimmed(),
        format_created_at(&ticket.created_at)
    ));
    if !ticket.description.is_empty() {
        out.push('\n');
        out.push_str(&ticket.description);
        out.push('\n');
    }
    out
}

pub fn format_status_colored(status: TicketStatus) -> String {
    let badge = format!("[{status}]");
    match status {
        TicketStatus::Open => badge.yellow().to_string(),
        TicketStatus::Closed => badge.green().to_string(),
    }
}

pub fn format_priority_colored(priority: TicketPriority) -> String {
    let badge = format!("[{priority}]");
    match priority {
        TicketPriority::Critical => badge.red().bold().to_string(),
        TicketPriority::High => badge.red().to_string(),
        TicketPriority::Medium => badge.yellow().to_string(),
        TicketPriority::Low => badge.dimmed().to_string(),
    }
}
