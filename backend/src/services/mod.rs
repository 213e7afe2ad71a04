//! Service layer: the aggregation pipeline.
//!
//! Services are pure functions over already materialized events. They hold no
//! state between calls; [`summary::build_summary`] ties them together.

pub mod aggregation;
pub mod charts;
pub mod filtering;
pub mod summary;


pub use aggregation::{
    average_duration_minutes, peak_usage_hour, raw_category_counts, CategoryCounts, PeakHour,
    RawCategoryCounts, RoomUsage, RoomUsageTable,
};
pub use charts::{ChartKind, ChartPayload, ChartSeries, ChartSet, Statistics};
pub use filtering::{apply_filters, FilteredView};
pub use summary::{build_summary, DashboardSummary, EventListing, SummaryRequest};
