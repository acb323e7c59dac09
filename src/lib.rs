//! # perfily
//!
//! Terminal client for the Perfily behavioral test funnel.
//!
//! A visitor picks a test, answers its questions and receives a teaser
//! profile; the full report unlocks behind a payment step. Questions and
//! results come exclusively from the remote scoring service; the crate owns
//! the session/navigation state machine in between: one persisted session,
//! a route kept in sync with the current screen, and guarded load/submit
//! operations that never run twice concurrently.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use perfily::AppError;
//! use perfily::api::{DEFAULT_BASE_URL, HttpScoringApi};
//! use perfily::store::SessionStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let api = Arc::new(HttpScoringApi::new(DEFAULT_BASE_URL)?);
//!     let store = SessionStore::new(SessionStore::default_dir());
//!     perfily::run(api, store, "/").await
//! }
//! ```

pub mod api;
pub mod data;
mod funnel;
pub mod models;
pub mod router;
pub mod store;
pub mod terminal;

use std::io;

use thiserror::Error;

pub use funnel::{Controller, FunnelApp, GENERIC_API_ERROR, SharedApp, Step, run};

/// Error type for running the funnel client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal or event IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The scoring API client could not be built.
    #[error(transparent)]
    Api(#[from] api::ApiError),
}
