//! Ticket list synchronizer.
//!
//! Owns the filter and the fetched tickets. Any filter change, refresh event
//! or mutation re-fetches the whole list; the server is the only source of
//! ticket state and nothing is patched locally.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::api::TicketApi;
use crate::error::Result;
use crate::query::FilterState;
use crate::types::{Ticket, TicketCategory, TicketPriority, TicketStatus};

use super::refresh::RefreshEvent;
use super::{FetchOutcome, RequestSequence, RequestToken, Revision, SyncPhase};

/// View state of the ticket list
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub filter: FilterState,
    /// Tickets from the latest applied fetch
    pub tickets: Vec<Ticket>,
    pub phase: SyncPhase,
    /// Message of the last failure, cleared by the next success
    pub last_error: Option<String>,
    sequence: RequestSequence,
}

impl ListState {
    /// Number of fetches issued since creation
    pub fn fetches_issued(&self) -> u64 {
        self.sequence.issued()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SyncPhase::Fetching
    }
}

pub struct TicketListSync<A: TicketApi> {
    api: Arc<A>,
    state: Mutex<ListState>,
    revision: Revision,
}

impl<A: TicketApi> TicketListSync<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_filter(api, FilterState::default())
    }

    pub fn with_filter(api: Arc<A>, filter: FilterState) -> Self {
        Self {
            api,
            state: Mutex::new(ListState {
                filter,
                ..ListState::default()
            }),
            revision: Revision::new(),
        }
    }

    /// Copy of the current view state
    pub fn snapshot(&self) -> ListState {
        self.state.lock().clone()
    }

    pub fn tickets(&self) -> Vec<Ticket> {
        self.state.lock().tickets.clone()
    }

    pub fn phase(&self) -> SyncPhase {
        self.state.lock().phase
    }

    /// Revision counter bumped on every state change
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Initial load
    pub async fn mount(&self) -> Result<FetchOutcome> {
        self.fetch().await
    }

    /// Fetch with the current filter.
    ///
    /// Only the most recently issued fetch may update the list; an older
    /// response (success or failure) resolves as [`FetchOutcome::Stale`].
    pub async fn fetch(&self) -> Result<FetchOutcome> {
        let (token, query) = self.begin_fetch();
        tracing::debug!(?token, %query, "fetching tickets");
        let result = self.api.list_tickets(&query).await;
        self.finish_fetch(token, result)
    }

    fn begin_fetch(&self) -> (RequestToken, String) {
        let issued = {
            let mut state = self.state.lock();
            let token = state.sequence.issue();
            state.phase = SyncPhase::Fetching;
            (token, state.filter.to_query())
        };
        self.revision.bump();
        issued
    }

    fn finish_fetch(
        &self,
        token: RequestToken,
        result: Result<Vec<Ticket>>,
    ) -> Result<FetchOutcome> {
        let outcome = {
            let mut state = self.state.lock();
            if !state.sequence.is_current(token) {
                tracing::debug!(?token, "discarding stale ticket list response");
                return Ok(FetchOutcome::Stale);
            }
            match result {
                Ok(tickets) => {
                    state.tickets = tickets;
                    state.phase = SyncPhase::Loaded;
                    state.last_error = None;
                    Ok(FetchOutcome::Applied)
                }
                Err(e) => {
                    tracing::warn!("failed to fetch tickets: {e}");
                    state.phase = SyncPhase::Error;
                    state.last_error = Some(format!("Failed to fetch tickets: {e}"));
                    Err(e)
                }
            }
        };
        self.revision.bump();
        outcome
    }

    /// Edit the filter in place, re-fetching only if it changed.
    ///
    /// Returns `None` when the edit left the filter as it was.
    async fn update_filter<F>(&self, edit: F) -> Result<Option<FetchOutcome>>
    where
        F: FnOnce(&mut FilterState),
    {
        let changed = {
            let mut state = self.state.lock();
            let before = state.filter.clone();
            edit(&mut state.filter);
            state.filter != before
        };
        if !changed {
            return Ok(None);
        }
        self.fetch().await.map(Some)
    }

    /// Replace the whole filter
    pub async fn set_filter(&self, filter: FilterState) -> Result<Option<FetchOutcome>> {
        self.update_filter(|f| *f = filter).await
    }

    pub async fn set_search(&self, search: impl Into<String>) -> Result<Option<FetchOutcome>> {
        let search = search.into();
        self.update_filter(|f| f.search = search).await
    }

    pub async fn set_status_filter(
        &self,
        status: Option<TicketStatus>,
    ) -> Result<Option<FetchOutcome>> {
        self.update_filter(|f| f.status = status.map(|s| s.to_string()).unwrap_or_default())
            .await
    }

    pub async fn set_category_filter(
        &self,
        category: Option<TicketCategory>,
    ) -> Result<Option<FetchOutcome>> {
        self.update_filter(|f| f.category = category).await
    }

    pub async fn set_priority_filter(
        &self,
        priority: Option<TicketPriority>,
    ) -> Result<Option<FetchOutcome>> {
        self.update_filter(|f| f.priority = priority).await
    }

    /// Ask the server to change a ticket's status, then reload the list.
    ///
    /// A failed update leaves the list untouched and is surfaced as an error
    /// state; no reload is attempted.
    pub async fn change_status(&self, id: u64, status: TicketStatus) -> Result<FetchOutcome> {
        tracing::debug!(id, %status, "updating ticket status");
        if let Err(e) = self.api.update_ticket(id, status).await {
            self.record_mutation_error(format!("Failed to update ticket {id}: {e}"));
            return Err(e);
        }
        self.fetch().await
    }

    /// Delete a ticket, then reload the list
    pub async fn delete(&self, id: u64) -> Result<FetchOutcome> {
        tracing::debug!(id, "deleting ticket");
        if let Err(e) = self.api.delete_ticket(id).await {
            self.record_mutation_error(format!("Failed to delete ticket {id}: {e}"));
            return Err(e);
        }
        self.fetch().await
    }

    fn record_mutation_error(&self, message: String) {
        tracing::warn!("{message}");
        {
            let mut state = self.state.lock();
            state.phase = SyncPhase::Error;
            state.last_error = Some(message);
        }
        self.revision.bump();
    }

    /// React to a refresh notification
    pub async fn on_refresh(&self, event: RefreshEvent) -> Result<FetchOutcome> {
        tracing::debug!(generation = event.generation, "ticket list refresh");
        self.fetch().await
    }

    /// Re-fetch once per refresh event until the signal is dropped
    pub fn listen(self: Arc<Self>, mut rx: broadcast::Receiver<RefreshEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let event = match rx.recv().await {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "ticket list missed refresh events");
                        RefreshEvent { generation: 0 }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                // Failures are already recorded in the list state
                let _ = self.on_refresh(event).await;
            }
        })
    }
}
