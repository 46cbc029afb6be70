//! Statistics synchronizer.
//!
//! Stats start absent rather than zeroed so a rendering layer can show a
//! loading placeholder until the first successful fetch. Each successful
//! fetch replaces the snapshot wholesale.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::api::TicketApi;
use crate::error::Result;
use crate::types::StatsSnapshot;

use super::refresh::RefreshEvent;
use super::{FetchOutcome, RequestSequence, Revision, SyncPhase};

#[derive(Debug, Clone, Default)]
pub struct StatsState {
    /// `None` until the first successful fetch
    pub stats: Option<StatsSnapshot>,
    pub phase: SyncPhase,
    pub last_error: Option<String>,
    sequence: RequestSequence,
}

impl StatsState {
    pub fn fetches_issued(&self) -> u64 {
        self.sequence.issued()
    }
}

pub struct StatsSync<A: TicketApi> {
    api: Arc<A>,
    state: Mutex<StatsState>,
    revision: Revision,
}

impl<A: TicketApi> StatsSync<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: Mutex::new(StatsState::default()),
            revision: Revision::new(),
        }
    }

    pub fn snapshot(&self) -> StatsState {
        self.state.lock().clone()
    }

    pub fn stats(&self) -> Option<StatsSnapshot> {
        self.state.lock().stats.clone()
    }

    pub fn changes(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub async fn mount(&self) -> Result<FetchOutcome> {
        self.fetch().await
    }

    /// Fetch and replace the snapshot if this is still the latest request
    pub async fn fetch(&self) -> Result<FetchOutcome> {
        let token = {
            let mut state = self.state.lock();
            state.phase = SyncPhase::Fetching;
            state.sequence.issue()
        };
        self.revision.bump();

        let result = self.api.get_stats().await;

        let outcome = {
            let mut state = self.state.lock();
            if !state.sequence.is_current(token) {
                tracing::debug!(?token, "discarding stale stats response");
                return Ok(FetchOutcome::Stale);
            }
            match result {
                Ok(stats) => {
                    state.stats = Some(stats);
                    state.phase = SyncPhase::Loaded;
                    state.last_error = None;
                    Ok(FetchOutcome::Applied)
                }
                Err(e) => {
                    tracing::warn!("failed to fetch stats: {e}");
                    state.phase = SyncPhase::Error;
                    state.last_error = Some(format!("Failed to fetch stats: {e}"));
                    Err(e)
                }
            }
        };
        self.revision.bump();
        outcome
    }

    pub async fn on_refresh(&self, event: RefreshEvent) -> Result<FetchOutcome> {
        tracing::debug!(generation = event.generation, "stats refresh");
        self.fetch().await
    }

    /// Re-fetch once per refresh event until the signal is dropped
    pub fn listen(self: Arc<Self>, mut rx: broadcast::Receiver<RefreshEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let event = match rx.recv().await {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "stats missed refresh events");
                        RefreshEvent { generation: 0 }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let _ = self.on_refresh(event).await;
            }
        })
    }
}
