//! Ticket creation form controller.
//!
//! Holds the draft fields, asks the server for a classification when the
//! description loses focus, and submits the draft. A successful submission
//! resets the draft and notifies the [`RefreshSignal`] once.
//!
//! Classification and submission are serialized through an async gate: a
//! submit issued while a classification is in flight waits for it, so the
//! submitted ticket always carries the applied suggestions.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::api::{CreateOutcome, TicketApi};
use crate::error::{DeskError, Result};
use crate::types::{Classification, DraftTicket, Ticket, TicketCategory, TicketPriority};

use super::Revision;
use super::refresh::RefreshSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Classifying,
    Submitting,
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub draft: DraftTicket,
    pub phase: FormPhase,
    /// Inline message for the last failed classification or submission
    pub last_error: Option<String>,
}

pub struct TicketFormController<A: TicketApi> {
    api: Arc<A>,
    refresh: RefreshSignal,
    state: Mutex<FormState>,
    gate: tokio::sync::Mutex<()>,
    revision: Revision,
}

impl<A: TicketApi> TicketFormController<A> {
    pub fn new(api: Arc<A>, refresh: RefreshSignal) -> Self {
        Self {
            api,
            refresh,
            state: Mutex::new(FormState::default()),
            gate: tokio::sync::Mutex::new(()),
            revision: Revision::new(),
        }
    }

    pub fn snapshot(&self) -> FormState {
        self.state.lock().clone()
    }

    pub fn draft(&self) -> DraftTicket {
        self.state.lock().draft.clone()
    }

    pub fn phase(&self) -> FormPhase {
        self.state.lock().phase
    }

    pub fn changes(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn edit(&self, apply: impl FnOnce(&mut FormState)) {
        apply(&mut self.state.lock());
        self.revision.bump();
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.edit(|s| s.draft.title = title);
    }

    pub fn set_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.edit(|s| s.draft.description = description);
    }

    pub fn set_category(&self, category: TicketCategory) {
        self.edit(|s| s.draft.category = category);
    }

    pub fn set_priority(&self, priority: TicketPriority) {
        self.edit(|s| s.draft.priority = priority);
    }

    /// Description lost focus: request a classification.
    ///
    /// Returns `Ok(None)` without a request when the description is blank.
    /// Only the fields the server suggested are overwritten.
    pub async fn blur_description(&self) -> Result<Option<Classification>> {
        let _gate = self.gate.lock().await;

        let description = self.state.lock().draft.description.clone();
        if description.trim().is_empty() {
            return Ok(None);
        }

        self.edit(|s| s.phase = FormPhase::Classifying);
        let result = self.api.classify_description(&description).await;

        match result {
            Ok(classification) => {
                self.edit(|s| {
                    if let Some(category) = classification.suggested_category {
                        s.draft.category = category;
                    }
                    if let Some(priority) = classification.suggested_priority {
                        s.draft.priority = priority;
                    }
                    s.phase = FormPhase::Editing;
                });
                tracing::debug!(?classification, "applied classification");
                Ok(Some(classification))
            }
            Err(e) => {
                tracing::warn!("classification failed: {e}");
                self.edit(|s| {
                    s.phase = FormPhase::Editing;
                    s.last_error = Some(format!("Could not get suggestions: {e}"));
                });
                Err(e)
            }
        }
    }

    /// Submit the current draft.
    ///
    /// On success the draft is reset to defaults and the refresh signal is
    /// notified exactly once. On any failure the draft is left intact.
    pub async fn submit(&self) -> Result<Ticket> {
        let _gate = self.gate.lock().await;

        let draft = self.state.lock().draft.clone();
        if let Err(e) = draft.validate() {
            self.edit(|s| s.last_error = Some(e.to_string()));
            return Err(e);
        }

        self.edit(|s| s.phase = FormPhase::Submitting);
        let result = self.api.create_ticket(&draft).await;

        match result {
            Ok(CreateOutcome::Created(ticket)) => {
                tracing::debug!(id = ticket.id, "ticket created");
                self.edit(|s| *s = FormState::default());
                self.refresh.notify();
                Ok(ticket)
            }
            Ok(CreateOutcome::Rejected(payload)) => {
                self.edit(|s| {
                    s.phase = FormPhase::Editing;
                    s.last_error = Some(format!("Ticket was not created: {payload}"));
                });
                Err(DeskError::Rejected(payload))
            }
            Err(e) => {
                self.edit(|s| {
                    s.phase = FormPhase::Editing;
                    s.last_error = Some(format!("Ticket was not created: {e}"));
                });
                Err(e)
            }
        }
    }
}
