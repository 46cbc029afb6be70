//! Filter state and the query strings it maps to.
//!
//! The list endpoint expects `?key=value&` pairs in a fixed order:
//! `search`, `status`, then `category` and `priority`. Every pair carries a
//! trailing `&` and an empty filter produces a bare `?`.

use url::form_urlencoded;

use crate::types::{TicketCategory, TicketPriority, TicketStatus};

/// User-controlled filters for the ticket list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text search over title and description (empty = no filter)
    pub search: String,
    /// Status filter (empty = all statuses)
    pub status: String,
    pub category: Option<TicketCategory>,
    pub priority: Option<TicketPriority>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: Option<TicketStatus>) -> Self {
        self.status = status.map(|s| s.to_string()).unwrap_or_default();
        self
    }

    pub fn with_category(mut self, category: Option<TicketCategory>) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: Option<TicketPriority>) -> Self {
        self.priority = priority;
        self
    }

    /// True when no filter narrows the list
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.status.is_empty()
            && self.category.is_none()
            && self.priority.is_none()
    }

    /// Query string for the list endpoint
    pub fn to_query(&self) -> String {
        let mut query = build_query(&self.search, &self.status);
        if let Some(category) = self.category {
            push_pair(&mut query, "category", category.as_str());
        }
        if let Some(priority) = self.priority {
            push_pair(&mut query, "priority", priority.as_str());
        }
        query
    }
}

/// Map search text and status to the list query string.
///
/// Values are form-urlencoded; plain alphanumeric values come out unchanged.
pub fn build_query(search: &str, status: &str) -> String {
    let mut query = String::from("?");
    if !search.is_empty() {
        push_pair(&mut query, "search", search);
    }
    if !status.is_empty() {
        push_pair(&mut query, "status", status);
    }
    query
}

fn push_pair(query: &mut String, key: &str, value: &str) {
    query.push_str(key);
    query.push('=');
    query.extend(form_urlencoded::byte_serialize(value.as_bytes()));
    query.push('&');
}
