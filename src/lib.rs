// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod classify;
pub mod config;
pub mod dedup;
pub mod feed;
pub mod notify;
pub mod poller;
pub mod remote;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::poller::{spawn_poller, Pipeline, PollerCfg};
