//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::DashboardSettings;
use crate::source::EventSource;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where `GET` summaries read their events from
    pub source: Arc<dyn EventSource>,
    pub settings: DashboardSettings,
}

impl AppState {
    pub fn new(source: Arc<dyn EventSource>, settings: DashboardSettings) -> Self {
        Self { source, settings }
    }
}
