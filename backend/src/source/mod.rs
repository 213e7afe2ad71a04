//! Event sources.
//!
//! The aggregation engine only needs a materialized list of events. Where the
//! list comes from sits behind the [`EventSource`] trait so the HTTP layer can
//! be served from memory in tests and from an exported JSON file in
//! deployment. Every fetch returns a fresh copy; nothing is cached.

use async_trait::async_trait;

use crate::error::DashboardResult;
use crate::models::Event;

pub mod factory;
pub mod file;
pub mod local;

pub use factory::{SourceFactory, SourceType};
pub use file::FileEventSource;
pub use local::LocalEventSource;

/// Supplier of calendar events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Short name used in logs and health output.
    fn name(&self) -> &str;

    /// Fetch the full current event list.
    async fn fetch_events(&self) -> DashboardResult<Vec<Event>>;

    /// Check that the source can currently be read.
    async fn health_check(&self) -> DashboardResult<bool>;
}
