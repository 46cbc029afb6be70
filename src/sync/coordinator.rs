//! Session root tying the synchronizers together.
//!
//! [`Desk`] owns the shared [`RefreshSignal`]. The list and stats
//! synchronizers subscribe to it on mount; the form controller notifies it
//! after each successful creation.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::api::TicketApi;
use crate::error::Result;
use crate::query::FilterState;

use super::form::TicketFormController;
use super::list::TicketListSync;
use super::refresh::{RefreshEvent, RefreshSignal};
use super::stats::StatsSync;
use super::FetchOutcome;

pub struct Desk<A: TicketApi> {
    refresh: RefreshSignal,
    list: Arc<TicketListSync<A>>,
    stats: Arc<StatsSync<A>>,
    form: Arc<TicketFormController<A>>,
    listeners: Mutex<Vec<JoinHandle<()>>>,
}

impl<A: TicketApi> Desk<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_filter(api, FilterState::default())
    }

    pub fn with_filter(api: Arc<A>, filter: FilterState) -> Self {
        let refresh = RefreshSignal::new();
        Self {
            list: Arc::new(TicketListSync::with_filter(Arc::clone(&api), filter)),
            stats: Arc::new(StatsSync::new(Arc::clone(&api))),
            form: Arc::new(TicketFormController::new(api, refresh.clone())),
            refresh,
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe the list and stats to the refresh signal, then load both.
    ///
    /// The two initial fetches run concurrently. Their results are returned
    /// as-is; a failure is also recorded in the corresponding view state.
    /// Calling `mount` again does not add a second set of listeners.
    pub async fn mount(&self) -> (Result<FetchOutcome>, Result<FetchOutcome>) {
        {
            let mut listeners = self.listeners.lock();
            if listeners.is_empty() {
                listeners.push(Arc::clone(&self.list).listen(self.refresh.subscribe()));
                listeners.push(Arc::clone(&self.stats).listen(self.refresh.subscribe()));
            }
        }
        tracing::debug!("mounting ticket desk");
        futures::join!(self.list.mount(), self.stats.mount())
    }

    pub fn list(&self) -> &Arc<TicketListSync<A>> {
        &self.list
    }

    pub fn stats(&self) -> &Arc<StatsSync<A>> {
        &self.stats
    }

    pub fn form(&self) -> &Arc<TicketFormController<A>> {
        &self.form
    }

    pub fn refresh_signal(&self) -> &RefreshSignal {
        &self.refresh
    }

    /// Signal that ticket data changed outside the form
    pub fn notify_ticket_created(&self) -> RefreshEvent {
        self.refresh.notify()
    }
}

impl<A: TicketApi> Drop for Desk<A> {
    fn drop(&mut self) {
        for handle in self.listeners.get_mut().drain(..) {
            handle.abort();
        }
    }
}
