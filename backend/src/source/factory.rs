//! Source factory for dependency injection.
//!
//! Builds the configured [`EventSource`] from [`SourceSettings`].

use std::str::FromStr;
use std::sync::Arc;

use super::{EventSource, FileEventSource, LocalEventSource};
use crate::config::SourceSettings;
use crate::error::{DashboardError, DashboardResult, ErrorContext};

/// Source type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// In-memory list, empty at startup
    Local,
    /// JSON file re-read on every fetch
    File,
}

impl FromStr for SourceType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "file" | "json" => Ok(Self::File),
            _ => Err(DashboardError::configuration_with_context(
                format!("Unknown source type: {}", s),
                ErrorContext::new("parse_source_type").with_target(s),
            )),
        }
    }
}

/// Factory for creating event sources.
pub struct SourceFactory;

impl SourceFactory {
    /// Create the source described by `settings`.
    ///
    /// # Errors
    /// Returns a configuration error for an unknown type, or for a `file`
    /// source without a path.
    pub fn create(settings: &SourceSettings) -> DashboardResult<Arc<dyn EventSource>> {
        match settings.source_type()? {
            SourceType::Local => Ok(Self::create_local()),
            SourceType::File => {
                let path = settings.path.as_ref().ok_or_else(|| {
                    DashboardError::configuration_with_context(
                        "File source requires a path",
                        ErrorContext::new("create_source").with_target("file"),
                    )
                })?;
                log::info!("Reading events from {}", path.display());
                Ok(Arc::new(FileEventSource::new(path.clone())))
            }
        }
    }

    /// Create an empty in-memory source.
    pub fn create_local() -> Arc<dyn EventSource> {
        Arc::new(LocalEventSource::new())
    }
}
