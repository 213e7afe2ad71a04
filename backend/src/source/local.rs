//! In-memory event source.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use super::EventSource;
use crate::error::DashboardResult;
use crate::models::Event;

/// In-memory source, suitable for tests and for serving events posted by a
/// separate sync job.
///
/// Clones share the same underlying list.
///
/// # Example
/// ```
/// use room_usage::source::{EventSource, LocalEventSource};
///
/// # async fn demo() {
/// let source = LocalEventSource::new();
/// assert!(source.fetch_events().await.unwrap().is_empty());
/// # }
/// ```
#[derive(Clone, Default)]
pub struct LocalEventSource {
    events: Arc<RwLock<Vec<Event>>>,
}

impl LocalEventSource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events)),
        }
    }

    /// Replace the whole event list.
    pub fn replace(&self, events: Vec<Event>) {
        let mut guard = self.events.write();
        log::debug!("Replacing {} local events with {}", guard.len(), events.len());
        *guard = events;
    }

    pub fn push(&self, event: Event) {
        self.events.write().push(event);
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

#[async_trait]
impl EventSource for LocalEventSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn fetch_events(&self) -> DashboardResult<Vec<Event>> {
        Ok(self.events.read().clone())
    }

    async fn health_check(&self) -> DashboardResult<bool> {
        Ok(true)
    }
}
