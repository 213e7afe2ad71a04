//! Summary orchestration.
//!
//! [`build_summary`] is the single entry point the HTTP layer and library
//! users call. It derives the time window, runs the filter engine, aggregates
//! and renders chart series, statistics and the event list. Nothing is cached
//! between calls.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::DashboardSettings;
use crate::models::{Event, EventId, FilterSet, TimeWindow, WindowMode};
use crate::services::aggregation::{
    average_duration_minutes, peak_usage_hour, raw_category_counts, CategoryCounts,
    RawCategoryCounts, RoomUsageTable,
};
use crate::services::charts::{
    category_usage_chart, event_count_chart, room_usage_chart, statistics, ChartKind,
    ChartPayload, ChartSet, Statistics,
};
use crate::services::filtering::apply_filters;

pub use crate::services::aggregation::NO_LOCATION;

/// Placeholder shown for events without an instructor.
pub const NO_PROFESSOR: &str = "No professor specified";

/// Everything the dashboard lets a user choose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// `day` (or `today`), `week` or `month`. Anything else selects nothing.
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub filters: FilterSet,
    #[serde(default)]
    pub search: String,
}

fn default_mode() -> String {
    WindowMode::Day.as_str().to_string()
}

impl Default for SummaryRequest {
    fn default() -> Self {
        Self::new(WindowMode::Day)
    }
}

impl SummaryRequest {
    pub fn new(mode: WindowMode) -> Self {
        Self {
            mode: mode.as_str().to_string(),
            filters: FilterSet::default(),
            search: String::new(),
        }
    }

    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn window(&self, now: DateTime<Tz>, settings: &DashboardSettings) -> TimeWindow {
        TimeWindow::for_mode_name(&self.mode, now, settings.week_start)
    }
}

/// One row of the event list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListing {
    pub id: EventId,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub who: String,
}

impl EventListing {
    pub fn from_event(event: &Event, tz: &Tz) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            date: event.start_date_label(tz),
            start_time: event.start_time_label(tz),
            end_time: event.end_time_label(tz),
            location: event.location().unwrap_or(NO_LOCATION).to_string(),
            who: event.who().unwrap_or(NO_PROFESSOR).to_string(),
        }
    }
}

/// Full dashboard state derived from one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub request: SummaryRequest,
    pub window: TimeWindow,
    pub total_events: usize,
    pub rooms: RoomUsageTable,
    pub category_totals: CategoryCounts,
    pub raw_category_counts: RawCategoryCounts,
    pub charts: ChartSet,
    pub statistics: Statistics,
    /// Events passing the search, in input order.
    pub listing: Vec<EventListing>,
}

impl DashboardSummary {
    /// Payload of a single dashboard tab.
    pub fn chart(&self, kind: ChartKind) -> ChartPayload {
        match kind {
            ChartKind::EventCount => ChartPayload::EventCount(self.charts.event_count.clone()),
            ChartKind::RoomUsage => ChartPayload::RoomUsage(self.charts.room_usage.clone()),
            ChartKind::CategoryUsage => {
                ChartPayload::CategoryUsage(self.charts.category_usage.clone())
            }
            ChartKind::Statistics => ChartPayload::Statistics(self.statistics.clone()),
        }
    }
}

/// Compute the dashboard for `events` as seen at `now`.
pub fn build_summary(
    events: &[Event],
    request: &SummaryRequest,
    now: DateTime<Utc>,
    settings: &DashboardSettings,
) -> DashboardSummary {
    let tz = settings.timezone;
    let window = request.window(now.with_timezone(&tz), settings);
    let view = apply_filters(events, &window, &request.filters, &request.search, &tz);

    let rooms = RoomUsageTable::build(&view.filtered);
    let category_totals = rooms.category_totals();
    let raw_counts = raw_category_counts(&view.filtered);
    let average = average_duration_minutes(&view.filtered);
    let peak = peak_usage_hour(&view.filtered, &tz);

    let charts = ChartSet {
        event_count: event_count_chart(&raw_counts),
        room_usage: room_usage_chart(&rooms),
        category_usage: category_usage_chart(&category_totals),
    };
    let statistics = statistics(&rooms, average, peak);
    let listing = view
        .displayed
        .iter()
        .map(|event| EventListing::from_event(event, &tz))
        .collect();

    log::debug!(
        "Built summary mode={} events={} filtered={} rooms={} peak={}",
        request.mode,
        events.len(),
        view.filtered.len(),
        rooms.len(),
        statistics.peak_hour
    );

    DashboardSummary {
        request: request.clone(),
        window,
        total_events: view.filtered.len(),
        rooms,
        category_totals,
        raw_category_counts: raw_counts,
        charts,
        statistics,
        listing,
    }
}
