//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for the actual work.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use chrono::Utc;

use super::dto::{
    FilterInfo, FilterListResponse, HealthResponse, PostSummaryRequest, SummaryQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::error::{DashboardError, ErrorContext};
use crate::models::{FilterName, WindowMode};
use crate::parsing::parse_events_value;
use crate::services::{build_summary, ChartKind, ChartPayload, DashboardSummary, SummaryRequest};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Reports whether the service is up and its event source readable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let source_status = match state.source.health_check().await {
        Ok(true) => "available".to_string(),
        Ok(false) => "unavailable".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.source.name().to_string(),
        source_status,
    }))
}

// =============================================================================
// Summaries
// =============================================================================

async fn summarize_source(
    state: &AppState,
    request: &SummaryRequest,
) -> Result<DashboardSummary, AppError> {
    let events = state.source.fetch_events().await?;
    Ok(build_summary(&events, request, Utc::now(), &state.settings))
}

/// GET /v1/summary?mode=week&filters=cpe,isne&search=lab
///
/// Full dashboard over the configured source.
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> HandlerResult<DashboardSummary> {
    let request = query.into_request()?;
    let summary = summarize_source(&state, &request).await?;
    Ok(Json(summary))
}

/// POST /v1/summary
///
/// Full dashboard over the events in the request body.
pub async fn post_summary(
    State(state): State<AppState>,
    body: Result<Json<PostSummaryRequest>, JsonRejection>,
) -> HandlerResult<DashboardSummary> {
    let Json(body) = body?;
    let request = body.summary_request()?;
    let now = body.now.unwrap_or_else(Utc::now);
    let events = parse_events_value(body.events).map_err(|e| {
        DashboardError::parse_with_context(
            format!("{:#}", e),
            ErrorContext::new("post_summary").with_target("events"),
        )
    })?;

    Ok(Json(build_summary(&events, &request, now, &state.settings)))
}

/// GET /v1/charts/{kind}
///
/// A single dashboard tab: `event-count`, `room-usage`, `category-usage` or
/// `statistics`.
pub async fn get_chart(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> HandlerResult<ChartPayload> {
    let kind: ChartKind = kind.parse()?;
    let request = query.into_request()?;
    let summary = summarize_source(&state, &request).await?;
    Ok(Json(summary.chart(kind)))
}

// =============================================================================
// Metadata
// =============================================================================

/// GET /v1/filters
pub async fn list_filters() -> HandlerResult<FilterListResponse> {
    Ok(Json(FilterListResponse {
        filters: FilterName::ALL.into_iter().map(FilterInfo::from).collect(),
        modes: [WindowMode::Day, WindowMode::Week, WindowMode::Month]
            .iter()
            .map(|mode| mode.as_str().to_string())
            .collect(),
        charts: ChartKind::ALL
            .iter()
            .map(|kind| kind.as_str().to_string())
            .collect(),
    }))
}
