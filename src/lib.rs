pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
mod macros;
pub mod query;
pub mod sync;
pub mod types;

pub use api::{CreateOutcome, HttpTicketApi, TicketApi};
pub use config::Config;
pub use error::{DeskError, Result};
pub use query::{FilterState, build_query};
pub use sync::{
    Desk, FetchOutcome, FormPhase, RefreshEvent, RefreshSignal, StatsSync, SyncPhase,
    TicketFormController, TicketListSync,
};
pub use types::{
    Classification, DraftTicket, ErrorPayload, MAX_TITLE_LEN, StatsSnapshot, Ticket,
    TicketCategory, TicketPriority, TicketStatus,
};
