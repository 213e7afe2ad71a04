//! JSON file event source.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::EventSource;
use crate::error::{DashboardError, DashboardResult, ErrorContext};
use crate::models::Event;
use crate::parsing::parse_events_json_str;

/// Reads an exported event list (array or `{"events": [...]}`) from disk on
/// every fetch, so edits to the file show up on the next request.
#[derive(Debug, Clone)]
pub struct FileEventSource {
    path: PathBuf,
}

impl FileEventSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EventSource for FileEventSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_events(&self) -> DashboardResult<Vec<Event>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DashboardError::source_with_context(
                format!("Failed to read events file: {}", e),
                ErrorContext::new("fetch_events").with_target(self.path.display()),
            )
        })?;

        // A corrupt export is a server-side failure, not a bad request.
        let events = parse_events_json_str(&content).map_err(|e| {
            DashboardError::source_with_context(
                "Events file is not a valid event list",
                ErrorContext::new("fetch_events")
                    .with_target(self.path.display())
                    .with_details(format!("{:#}", e)),
            )
        })?;
        log::debug!("Loaded {} events from {}", events.len(), self.path.display());
        Ok(events)
    }

    async fn health_check(&self) -> DashboardResult<bool> {
        Ok(tokio::fs::metadata(&self.path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false))
    }
}
