//! Chart series and the statistics record handed to the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DashboardError, ErrorContext};
use crate::models::Category;
use crate::services::aggregation::{CategoryCounts, PeakHour, RawCategoryCounts, RoomUsageTable};

/// Fixed colors for the ISNE, CPE, MCPE and OTHER slices, in that order.
pub const CATEGORY_PALETTE: [&str; 4] = ["#36a2eb", "#ff9f40", "#4bc0c0", "#ff6384"];

/// Display order of categories in the category charts.
const CHART_ORDER: [Category; 4] = [
    Category::Isne,
    Category::Cpe,
    Category::Mcpe,
    Category::Other,
];

/// How a series is meant to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartShape {
    Bar,
    HorizontalBar,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub label: String,
    pub value: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Dataset caption
    pub title: String,
    pub shape: ChartShape,
    pub entries: Vec<ChartEntry>,
}

impl ChartSeries {
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.value).collect()
    }
}

/// Color of the `index`-th room bar.
pub fn room_color(index: usize) -> String {
    format!("hsl({}, 70%, 50%)", index * 30)
}

/// Horizontal bars, one per room, busiest first.
pub fn room_usage_chart(table: &RoomUsageTable) -> ChartSeries {
    ChartSeries {
        title: "Room Usage".to_string(),
        shape: ChartShape::HorizontalBar,
        entries: table
            .rows()
            .iter()
            .enumerate()
            .map(|(i, usage)| ChartEntry {
                label: usage.room.clone(),
                value: usage.total,
                color: room_color(i),
            })
            .collect(),
    }
}

/// Doughnut of the exclusive category totals from the room table.
pub fn category_usage_chart(totals: &CategoryCounts) -> ChartSeries {
    ChartSeries {
        title: "Major Usage".to_string(),
        shape: ChartShape::Doughnut,
        entries: CHART_ORDER
            .into_iter()
            .zip(CATEGORY_PALETTE)
            .map(|(category, color)| ChartEntry {
                label: category.label().to_string(),
                value: totals.get(category),
                color: color.to_string(),
            })
            .collect(),
    }
}

/// Bars of the non-exclusive keyword counts. There is no OTHER bar.
pub fn event_count_chart(raw: &RawCategoryCounts) -> ChartSeries {
    let values = [raw.isne, raw.cpe, raw.mcpe];
    ChartSeries {
        title: "Event Count".to_string(),
        shape: ChartShape::Bar,
        entries: CHART_ORDER
            .into_iter()
            .zip(CATEGORY_PALETTE)
            .zip(values)
            .map(|((category, color), value)| ChartEntry {
                label: category.label().to_string(),
                value,
                color: color.to_string(),
            })
            .collect(),
    }
}

/// Summary numbers shown on the statistics tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_rooms_used: usize,
    /// `None` when no event passed the filters.
    pub average_duration_minutes: Option<f64>,
    /// Two-decimal minutes, or `"N/A"`.
    pub average_duration: String,
    pub peak_hour_start: Option<u32>,
    pub peak_hour: String,
}

pub fn statistics(table: &RoomUsageTable, average: Option<f64>, peak: PeakHour) -> Statistics {
    Statistics {
        total_rooms_used: table.len(),
        average_duration_minutes: average,
        average_duration: match average {
            Some(minutes) => format!("{:.2}", minutes),
            None => "N/A".to_string(),
        },
        peak_hour_start: peak.hour(),
        peak_hour: peak.to_string(),
    }
}

/// All three chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub event_count: ChartSeries,
    pub room_usage: ChartSeries,
    pub category_usage: ChartSeries,
}

/// Dashboard tab selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    EventCount,
    RoomUsage,
    CategoryUsage,
    Statistics,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::EventCount,
        ChartKind::RoomUsage,
        ChartKind::CategoryUsage,
        ChartKind::Statistics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::EventCount => "event-count",
            ChartKind::RoomUsage => "room-usage",
            ChartKind::CategoryUsage => "category-usage",
            ChartKind::Statistics => "statistics",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "event-count" | "majorChart" => Ok(ChartKind::EventCount),
            "room-usage" | "roomChart" => Ok(ChartKind::RoomUsage),
            "category-usage" | "doughnutChart" => Ok(ChartKind::CategoryUsage),
            "statistics" | "statistic" => Ok(ChartKind::Statistics),
            other => Err(DashboardError::InvalidRequest {
                message: format!("Unknown chart `{}`", other),
                context: ErrorContext::new("parse_chart_kind").with_details(
                    "expected event-count, room-usage, category-usage or statistics",
                ),
            }),
        }
    }
}

/// One tab's payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub enum ChartPayload {
    EventCount(ChartSeries),
    RoomUsage(ChartSeries),
    CategoryUsage(ChartSeries),
    Statistics(Statistics),
}
