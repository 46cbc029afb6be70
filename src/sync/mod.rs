//! Client-side synchronization with the ticket API.
//!
//! Each synchronizer owns one piece of view state, fetches it from the
//! server and publishes a revision number whenever that state changes so a
//! rendering layer knows when to redraw. The [`Desk`] coordinator wires them
//! together through a [`RefreshSignal`].
//!
//! State is kept behind a `parking_lot::Mutex` that is never held across an
//! `.await`.

pub mod coordinator;
pub mod form;
pub mod list;
pub mod refresh;
pub mod stats;

use std::fmt;

use tokio::sync::watch;

pub use coordinator::Desk;
pub use form::{FormPhase, FormState, TicketFormController};
pub use list::{ListState, TicketListSync};
pub use refresh::{RefreshEvent, RefreshSignal};
pub use stats::{StatsState, StatsSync};

/// Lifecycle of a fetched view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Fetching,
    Loaded,
    Error,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPhase::Idle => write!(f, "idle"),
            SyncPhase::Fetching => write!(f, "fetching"),
            SyncPhase::Loaded => write!(f, "loaded"),
            SyncPhase::Error => write!(f, "error"),
        }
    }
}

/// What happened to the response of a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was the latest issued and replaced the view state
    Applied,
    /// A newer fetch was issued before this one resolved; the response was dropped
    Stale,
}

/// Token identifying one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Monotonic request counter implementing last-request-wins.
///
/// A response may be applied only if its token is still the latest issued.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Number of requests issued so far
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

/// Revision counter published to the rendering layer
#[derive(Debug)]
pub(crate) struct Revision {
    tx: watch::Sender<u64>,
}

impl Revision {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    pub(crate) fn bump(&self) {
        self.tx.send_modify(|rev| *rev += 1);
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_token_is_current() {
        let mut seq = RequestSequence::default();
        let a = seq.issue();
        assert!(seq.is_current(a));

        let b = seq.issue();
        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));
        assert!(a < b);
        assert_eq!(seq.issued(), 2);
    }

    #[test]
    fn test_revision_bumps_are_observed() {
        let revision = Revision::new();
        let rx = revision.subscribe();
        revision.bump();
        revision.bump();
        assert_eq!(*rx.borrow(), 2);
    }
}
