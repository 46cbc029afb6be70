//! Ticket API access.
//!
//! [`TicketApi`] is the seam between the synchronizers and the transport.
//! [`HttpTicketApi`] talks to the REST backend; tests substitute scripted
//! implementations.

pub mod error;
pub mod http;

use serde_json::Value;

use crate::error::{DeskError, Result};
use crate::types::{Classification, DraftTicket, ErrorPayload, StatsSnapshot, Ticket, TicketStatus};

pub use error::{RetryPolicy, Retryable};
pub use http::HttpTicketApi;

/// Result of a create request.
///
/// The server signals success by returning an object with a non-zero `id`. That rule
/// is applied once, in [`CreateOutcome::from_body`], so callers only ever
/// match on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(Ticket),
    Rejected(ErrorPayload),
}

impl CreateOutcome {
    /// Classify a create response body.
    ///
    /// An object with a positive integer `id` is a success; `0` is not an id. When the rest of the body
    /// does not describe a full ticket, the submitted draft fills the gaps.
    pub fn from_body(body: Value, draft: &DraftTicket) -> Result<Self> {
        let id = body.get("id").and_then(Value::as_u64).filter(|id| *id > 0);
        match (id, body) {
            (Some(id), body) => match serde_json::from_value::<Ticket>(body.clone()) {
                Ok(ticket) => Ok(CreateOutcome::Created(ticket)),
                Err(e) => {
                    tracing::debug!("create response for ticket {id} is partial ({e}), using draft");
                    let created_at = body
                        .get("created_at")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    Ok(CreateOutcome::Created(Ticket {
                        id,
                        title: draft.title.clone(),
                        description: draft.description.clone(),
                        category: draft.category,
                        priority: draft.priority,
                        status: TicketStatus::Open,
                        created_at,
                    }))
                }
            },
            (None, Value::Object(map)) => Ok(CreateOutcome::Rejected(ErrorPayload(map))),
            (None, other) => Err(DeskError::Decode(format!(
                "expected a JSON object from create, got {other}"
            ))),
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created(_))
    }
}

/// Operations the synchronizers need from the ticket backend
pub trait TicketApi: Send + Sync + 'static {
    /// List tickets; `query` is a string built by [`crate::query::build_query`]
    fn list_tickets(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Ticket>>> + Send;

    /// Fetch a single ticket
    fn get_ticket(&self, id: u64) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    /// Create a ticket from the draft
    fn create_ticket(
        &self,
        draft: &DraftTicket,
    ) -> impl std::future::Future<Output = Result<CreateOutcome>> + Send;

    /// Ask the server for a category and priority suggestion
    fn classify_description(
        &self,
        description: &str,
    ) -> impl std::future::Future<Output = Result<Classification>> + Send;

    /// Change a ticket's status. Only `status` is sent.
    fn update_ticket(
        &self,
        id: u64,
        status: TicketStatus,
    ) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    /// Delete a ticket
    fn delete_ticket(&self, id: u64) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Aggregate counters
    fn get_stats(&self) -> impl std::future::Future<Output = Result<StatsSnapshot>> + Send;
}
