//! In-memory [`TicketApi`] with scripted responses.
//!
//! Keeps a ticket table that list/update/delete operate on, counts every
//! call, and can hold individual responses behind a gate so tests decide the
//! order in which concurrent requests resolve.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use helpdesk::api::{CreateOutcome, TicketApi};
use helpdesk::error::{DeskError, Result};
use helpdesk::types::{
    Classification, DraftTicket, StatsSnapshot, Ticket, TicketCategory, TicketPriority,
    TicketStatus,
};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;

use super::mock_data::{sample_stats_json, sample_tickets};

#[derive(Default)]
pub struct ScriptedApi {
    tickets: Mutex<Vec<Ticket>>,
    next_id: AtomicU64,
    stats: Mutex<StatsSnapshot>,
    classification: Mutex<Classification>,

    /// When set, create responds with this body instead of storing a ticket
    create_body: Mutex<Option<Value>>,
    list_error: Mutex<Option<String>>,
    stats_error: Mutex<Option<String>>,
    create_error: Mutex<Option<String>>,

    list_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    classify_gate: Mutex<Option<oneshot::Receiver<()>>>,
    stats_gate: Mutex<Option<oneshot::Receiver<()>>>,

    list_queries: Mutex<Vec<String>>,
    stats_calls: AtomicUsize,
    classify_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl ScriptedApi {
    /// Table seeded with [`sample_tickets`]
    pub fn new() -> Self {
        Self::with_tickets(sample_tickets())
    }

    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        let next_id = tickets.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            tickets: Mutex::new(tickets),
            next_id: AtomicU64::new(next_id),
            stats: Mutex::new(serde_json::from_value(sample_stats_json()).unwrap()),
            ..Default::default()
        }
    }

    pub fn set_classification(&self, classification: Classification) {
        *self.classification.lock() = classification;
    }

    /// Counters returned by later stats calls
    pub fn set_stats(&self, stats: StatsSnapshot) {
        *self.stats.lock() = stats;
    }

    pub fn respond_to_create_with(&self, body: Value) {
        *self.create_body.lock() = Some(body);
    }

    pub fn fail_list(&self, message: Option<&str>) {
        *self.list_error.lock() = message.map(str::to_string);
    }

    pub fn fail_stats(&self, message: Option<&str>) {
        *self.stats_error.lock() = message.map(str::to_string);
    }

    pub fn fail_create(&self, message: Option<&str>) {
        *self.create_error.lock() = message.map(str::to_string);
    }

    /// Hold the next list response for `query` until the sender fires
    pub fn hold_list(&self, query: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.lock().insert(query.to_string(), rx);
        tx
    }

    /// Hold the next classification response until the sender fires
    pub fn hold_classify(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.classify_gate.lock() = Some(rx);
        tx
    }

    /// Hold the next stats response until the sender fires.
    ///
    /// The held call answers with the counters current when it was made.
    pub fn hold_stats(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.stats_gate.lock() = Some(rx);
        tx
    }

    pub fn list_queries(&self) -> Vec<String> {
        self.list_queries.lock().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_queries.lock().len()
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub fn classify_calls(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self, id: u64) -> Option<Ticket> {
        self.tickets.lock().iter().find(|t| t.id == id).cloned()
    }

    fn matching(&self, query: &str) -> Vec<Ticket> {
        let pairs: Vec<(String, String)> =
            url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
                .into_owned()
                .collect();
        self.tickets
            .lock()
            .iter()
            .filter(|t| {
                pairs.iter().all(|(key, value)| match key.as_str() {
                    "search" => {
                        let needle = value.to_lowercase();
                        t.title.to_lowercase().contains(&needle)
                            || t.description.to_lowercase().contains(&needle)
                    }
                    "status" => t.status.as_str() == value,
                    "category" => t.category.as_str() == value,
                    "priority" => t.priority.as_str() == value,
                    _ => true,
                })
            })
            .cloned()
            .collect()
    }
}

impl TicketApi for ScriptedApi {
    async fn list_tickets(&self, query: &str) -> Result<Vec<Ticket>> {
        self.list_queries.lock().push(query.to_string());
        let gate = self.list_gates.lock().remove(query);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(message) = self.list_error.lock().clone() {
            return Err(DeskError::Network(message));
        }
        Ok(self.matching(query))
    }

    async fn get_ticket(&self, id: u64) -> Result<Ticket> {
        self.stored(id).ok_or(DeskError::TicketNotFound(id))
    }

    async fn create_ticket(&self, draft: &DraftTicket) -> Result<CreateOutcome> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.create_error.lock().clone() {
            return Err(DeskError::Network(message));
        }
        if let Some(body) = self.create_body.lock().clone() {
            return CreateOutcome::from_body(body, draft);
        }
        let ticket = Ticket {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category,
            priority: draft.priority,
            status: TicketStatus::Open,
            created_at: "2026-02-20T12:00:00Z".to_string(),
        };
        self.tickets.lock().push(ticket.clone());
        Ok(CreateOutcome::Created(ticket))
    }

    async fn classify_description(&self, _description: &str) -> Result<Classification> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.classify_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(self.classification.lock().clone())
    }

    async fn update_ticket(&self, id: u64, status: TicketStatus) -> Result<Ticket> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut tickets = self.tickets.lock();
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(DeskError::TicketNotFound(id))?;
        ticket.status = status;
        Ok(ticket.clone())
    }

    async fn delete_ticket(&self, id: u64) -> Result<()> {
        let mut tickets = self.tickets.lock();
        let before = tickets.len();
        tickets.retain(|t| t.id != id);
        if tickets.len() == before {
            return Err(DeskError::TicketNotFound(id));
        }
        Ok(())
    }

    async fn get_stats(&self) -> Result<StatsSnapshot> {
        let stats = self.stats.lock().clone();
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.stats_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(message) = self.stats_error.lock().clone() {
            return Err(DeskError::Network(message));
        }
        Ok(stats)
    }
}

/// Poll `condition` until it holds, panicking after two seconds
pub async fn wait_until(what: &str, condition: impl Fn() -> bool) {
    let waited = tokio::time::timeout(Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(waited.is_ok(), "timed out waiting for {what}");
}

/// Classification suggesting only a category
pub fn suggest_category(category: TicketCategory) -> Classification {
    Classification {
        suggested_category: Some(category),
        suggested_priority: None,
    }
}

/// Classification suggesting both fields
pub fn suggest_both(category: TicketCategory, priority: TicketPriority) -> Classification {
    Classification {
        suggested_category: Some(category),
        suggested_priority: Some(priority),
    }
}
