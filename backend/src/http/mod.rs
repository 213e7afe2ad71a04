//! HTTP server module.
//!
//! Exposes the summary engine as a small REST API. Handlers fetch events from
//! the configured [`crate::source::EventSource`] (or take them from the
//! request body) and hand them to [`crate::services::build_summary`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query / body parsing                                   │
//! │  - CORS, compression, tracing, error mapping              │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Window selection, filtering, aggregation, charts       │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Source Layer (source/)                                   │
//! │  - LocalEventSource / FileEventSource                     │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
