use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::types::{Classification, StatsSnapshot, Ticket};

/// Longest title shown in a list row before it is cut
const MAX_TITLE_COLUMN: usize = 48;

/// Format `created_at` for display
///
/// RFC 3339 timestamps are shown as `YYYY-MM-DD HH:MM` in UTC. Anything the
/// server sends that does not parse is shown verbatim.
///
/// # Examples
///
/// ```
/// use helpdesk::display::format_created_at;
///
/// assert_eq!(format_created_at("2026-02-19T09:30:12.5Z"), "2026-02-19 09:30");
/// assert_eq!(format_created_at("yesterday"), "yesterday");
/// ```
pub fn format_created_at(created_at: &str) -> String {
    match created_at.parse::<jiff::Timestamp>() {
        Ok(ts) => ts.strftime("%Y-%m-%d %H:%M").to_string(),
        Err(_) => created_at.to_string(),
    }
}

/// Cut a title to `max` characters, marking the cut with `...`
pub fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_string();
    }
    let kept: String = title.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// A row in the ticket list table
#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Ticket> for TicketRow {
    fn from(ticket: &Ticket) -> Self {
        TicketRow {
            id: ticket.id,
            status: ticket.status.to_string(),
            priority: ticket.priority.to_string(),
            category: ticket.category.to_string(),
            title: truncate_title(&ticket.title, MAX_TITLE_COLUMN),
            created: format_created_at(&ticket.created_at),
        }
    }
}

/// Render tickets as a table, in the order the server returned them
pub fn format_ticket_table(tickets: &[Ticket]) -> String {
    let rows: Vec<TicketRow> = tickets.iter().map(TicketRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Plain-text statistics summary
pub fn format_stats_plain(stats: &StatsSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total tickets: {}\n", stats.total_tickets));
    out.push_str(&format!("Open tickets:  {}\n", stats.open_tickets));
    out.push_str(&format!("Per day (avg): {:.1}\n", stats.avg_tickets_per_day));

    out.push_str("\nBy priority:\n");
    push_breakdown(&mut out, &stats.priority_breakdown);
    out.push_str("\nBy category:\n");
    push_breakdown(&mut out, &stats.category_breakdown);
    out
}

fn push_breakdown(out: &mut String, breakdown: &std::collections::BTreeMap<String, u64>) {
    if breakdown.is_empty() {
        out.push_str("  (none)\n");
        return;
    }
    let width = breakdown.keys().map(|k| k.len()).max().unwrap_or(0);
    for (key, count) in breakdown {
        out.push_str(&format!("  {key:<width$}  {count}\n"));
    }
}

/// Describe a classification, naming which fields had no suggestion
pub fn format_classification(classification: &Classification) -> String {
    let category = classification
        .suggested_category
        .map(|c| c.to_string())
        .unwrap_or_else(|| "no suggestion".to_string());
    let priority = classification
        .suggested_priority
        .map(|p| p.to_string())
        .unwrap_or_else(|| "no suggestion".to_string());
    format!("category: {category}\npriority: {priority}")
}
