use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DeskError;

/// Maximum title length accepted by the ticket API
pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    Billing,
    Technical,
    Account,
    #[default]
    General,
}

crate::wire_enum!(TicketCategory, DeskError::InvalidCategory, {
    Billing => "billing",
    Technical => "technical",
    Account => "account",
    General => "general",
});

pub const VALID_CATEGORIES: &[&str] = &["billing", "technical", "account", "general"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

crate::wire_enum!(TicketPriority, DeskError::InvalidPriority, {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high", "critical"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    #[default]
    Open,
    Closed,
}

crate::wire_enum!(TicketStatus, DeskError::InvalidStatus, {
    Open => "open",
    Closed => "closed",
});

pub const VALID_STATUSES: &[&str] = &["open", "closed"];

/// A ticket as stored by the server.
///
/// `id` and `created_at` are assigned by the server and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_at: String,
}

impl Ticket {
    /// Parse `created_at` as an RFC 3339 timestamp
    pub fn created_timestamp(&self) -> Option<jiff::Timestamp> {
        self.created_at.parse().ok()
    }
}

/// Ticket fields owned by the form until a successful submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTicket {
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
}

impl DraftTicket {
    /// Check the fields the server requires before anything is sent
    pub fn validate(&self) -> Result<(), DeskError> {
        if self.title.trim().is_empty() {
            return Err(DeskError::Validation("title is required".to_string()));
        }
        let len = self.title.chars().count();
        if len > MAX_TITLE_LEN {
            return Err(DeskError::Validation(format!(
                "title is {len} characters, maximum is {MAX_TITLE_LEN}"
            )));
        }
        if self.description.trim().is_empty() {
            return Err(DeskError::Validation("description is required".to_string()));
        }
        Ok(())
    }
}

/// Body of a status update. Only `status` is ever sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatch {
    pub status: TicketStatus,
}

/// Server suggestions for a ticket description.
///
/// A missing field means "no suggestion". Values the client does not
/// recognise are treated the same way rather than failing the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default, deserialize_with = "lenient_enum")]
    pub suggested_category: Option<TicketCategory>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub suggested_priority: Option<TicketPriority>,
}

fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok()))
}

/// Aggregate counters. Replaced wholesale on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_tickets: u64,
    pub open_tickets: u64,
    pub avg_tickets_per_day: f64,
    #[serde(default)]
    pub priority_breakdown: BTreeMap<String, u64>,
    #[serde(default)]
    pub category_breakdown: BTreeMap<String, u64>,
}

/// Field errors returned by the server when it refuses a ticket.
///
/// The shape is a JSON object, either `{"field": ["message", ...]}` or
/// `{"error": "message"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorPayload(pub serde_json::Map<String, serde_json::Value>);

impl ErrorPayload {
    pub fn from_message(message: impl Into<String>) -> Self {
        let mut map = serde_json::Map::new();
        map.insert("error".to_string(), serde_json::Value::String(message.into()));
        ErrorPayload(map)
    }

    /// Flatten into `field: message` lines (`error` entries are unprefixed)
    pub fn messages(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (field, value) in &self.0 {
            let texts: Vec<String> = match value {
                serde_json::Value::String(s) => vec![s.clone()],
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .collect(),
                other => vec![other.to_string()],
            };
            for text in texts {
                if field == "error" || field == "detail" || field == "non_field_errors" {
                    out.push(text);
                } else {
                    out.push(format!("{field}: {text}"));
                }
            }
        }
        out
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.messages();
        if messages.is_empty() {
            write!(f, "no details given")
        } else {
            write!(f, "{}", messages.join("; "))
        }
    }
}
