//! Core logic for the ELITE dashboard.
//!
//! - `responder`: first-match keyword replies for the assistant widget
//! - `chat`: message log with cancellable deferred replies
//! - `calendar`: month grid, navigation and view state
//! - `records`, `ledger`, `store`: dashboard data and its persistence
//! - `app_state`, `summary`, `config`: shell-facing state and figures

pub mod app_state;
pub mod calendar;
pub mod chat;
pub mod config;
pub mod error;
pub mod ledger;
pub mod records;
pub mod responder;
pub mod store;
pub mod summary;

pub use error::{EliteError, EliteResult};
pub use responder::{ResponseMatcher, respond};
