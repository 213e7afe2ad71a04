//! Data Transfer Objects for the HTTP API.
//!
//! Summaries and chart payloads are serialized straight from the service
//! types; only request shapes and small listings live here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DashboardResult;
use crate::models::{FilterName, FilterSet, WindowMode};
use crate::services::SummaryRequest;

/// Query parameters shared by `GET /v1/summary` and `GET /v1/charts/{kind}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// `day`, `week` or `month` (default `day`)
    #[serde(default)]
    pub mode: Option<String>,
    /// Comma-separated active filter names, e.g. `cpe,RoomReservation`
    #[serde(default)]
    pub filters: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl SummaryQuery {
    pub fn into_request(self) -> DashboardResult<SummaryRequest> {
        let filters = match self.filters.as_deref() {
            Some(list) => FilterSet::parse_list(list)?,
            None => FilterSet::default(),
        };
        let mut request = SummaryRequest::new(WindowMode::Day)
            .with_filters(filters)
            .with_search(self.search.unwrap_or_default());
        if let Some(mode) = self.mode {
            request.mode = mode;
        }
        Ok(request)
    }
}

/// Body of `POST /v1/summary`: summarize the posted events instead of the
/// configured source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummaryRequest {
    /// Bare event array or `{"events": [...]}` envelope
    pub events: serde_json::Value,
    #[serde(default)]
    pub mode: Option<String>,
    /// Active filter names
    #[serde(default)]
    pub filters: Vec<String>,
    #[serde(default)]
    pub search: String,
    /// Reference instant for the window (default: server clock)
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

impl PostSummaryRequest {
    pub fn summary_request(&self) -> DashboardResult<SummaryRequest> {
        let names = self
            .filters
            .iter()
            .map(|name| name.parse::<FilterName>())
            .collect::<DashboardResult<Vec<_>>>()?;
        let mut request = SummaryRequest::new(WindowMode::Day)
            .with_filters(FilterSet::with_active(names))
            .with_search(self.search.clone());
        if let Some(mode) = &self.mode {
            request.mode = mode.clone();
        }
        Ok(request)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Configured source name (`local`, `file`)
    pub source: String,
    /// `available`, `unavailable` or `error: ...`
    pub source_status: String,
}

/// One toggleable filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInfo {
    pub name: String,
    pub keyword: String,
}

impl From<FilterName> for FilterInfo {
    fn from(name: FilterName) -> Self {
        Self {
            name: name.name().to_string(),
            keyword: name.keyword().to_string(),
        }
    }
}

/// Response for `GET /v1/filters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterListResponse {
    pub filters: Vec<FilterInfo>,
    pub modes: Vec<String>,
    pub charts: Vec<String>,
}
