//! Aggregator: room usage, category counts and summary statistics.
//!
//! Every function here takes the *filtered* events (window + category stages,
//! before search) and recomputes from scratch.

use chrono::Timelike;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::models::{Category, Event};

/// Location substring marking a placeholder room (case-sensitive).
pub const UNLOCATED_SENTINEL: &str = "xxx";
/// Placeholder shown for events without a location. A booking whose location
/// literally reads this is treated as unlocated too.
pub const NO_LOCATION: &str = "No location specified";

/// Per-category event counts, keyed by the category labels when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    #[serde(rename = "CPE")]
    pub cpe: usize,
    #[serde(rename = "MCPE")]
    pub mcpe: usize,
    #[serde(rename = "ISNE")]
    pub isne: usize,
    #[serde(rename = "OTHER")]
    pub other: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Cpe => self.cpe,
            Category::Mcpe => self.mcpe,
            Category::Isne => self.isne,
            Category::Other => self.other,
        }
    }

    fn slot(&mut self, category: Category) -> &mut usize {
        match category {
            Category::Cpe => &mut self.cpe,
            Category::Mcpe => &mut self.mcpe,
            Category::Isne => &mut self.isne,
            Category::Other => &mut self.other,
        }
    }

    pub fn increment(&mut self, category: Category) {
        *self.slot(category) += 1;
    }

    pub fn add(&mut self, other: &CategoryCounts) {
        for category in Category::ALL {
            *self.slot(category) += other.get(category);
        }
    }

    pub fn total(&self) -> usize {
        Category::ALL.into_iter().map(|c| self.get(c)).sum()
    }
}

/// Usage of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomUsage {
    pub room: String,
    pub total: usize,
    /// Exclusive per-category split of `total`.
    pub majors: CategoryCounts,
}

/// Rooms sorted by total bookings, busiest first.
///
/// Rooms with equal totals keep the order in which they first appeared in
/// the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomUsageTable {
    rows: Vec<RoomUsage>,
}

/// Room an event counts toward, or `None` when it is unlocated.
pub fn room_key(event: &Event) -> Option<&str> {
    event
        .location()
        .filter(|location| *location != NO_LOCATION && !location.contains(UNLOCATED_SENTINEL))
}

impl RoomUsageTable {
    pub fn build(events: &[&Event]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut rows: Vec<RoomUsage> = Vec::new();

        for event in events {
            let Some(room) = room_key(event) else {
                continue;
            };
            let slot = *index.entry(room).or_insert_with(|| {
                rows.push(RoomUsage {
                    room: room.to_string(),
                    total: 0,
                    majors: CategoryCounts::default(),
                });
                rows.len() - 1
            });
            let usage = &mut rows[slot];
            usage.total += 1;
            usage.majors.increment(Category::classify(&event.title));
        }

        // Vec::sort_by is stable
        rows.sort_by(|a, b| b.total.cmp(&a.total));
        Self { rows }
    }

    pub fn rows(&self) -> &[RoomUsage] {
        &self.rows
    }

    pub fn get(&self, room: &str) -> Option<&RoomUsage> {
        self.rows.iter().find(|usage| usage.room == room)
    }

    /// Number of distinct rooms used.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the exclusive sub-counts over all rooms.
    ///
    /// Unlocated events are not in the table and therefore not in this sum.
    pub fn category_totals(&self) -> CategoryCounts {
        self.rows.iter().fold(CategoryCounts::default(), |mut acc, usage| {
            acc.add(&usage.majors);
            acc
        })
    }
}

/// Independent keyword counts over all filtered events.
///
/// A title mentioning two programs counts for both; location is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCategoryCounts {
    #[serde(rename = "CPE")]
    pub cpe: usize,
    #[serde(rename = "MCPE")]
    pub mcpe: usize,
    #[serde(rename = "ISNE")]
    pub isne: usize,
}

pub fn raw_category_counts(events: &[&Event]) -> RawCategoryCounts {
    let count = |category: Category| {
        events
            .iter()
            .filter(|event| category.mentioned_in(&event.title))
            .count()
    };
    RawCategoryCounts {
        cpe: count(Category::Cpe),
        mcpe: count(Category::Mcpe),
        isne: count(Category::Isne),
    }
}

/// Mean of `end - start` in minutes, rounded to two decimals.
///
/// `None` when there are no events.
pub fn average_duration_minutes(events: &[&Event]) -> Option<f64> {
    if events.is_empty() {
        return None;
    }
    let total_ms: i64 = events
        .iter()
        .map(|event| event.duration().num_milliseconds())
        .sum();
    let minutes = total_ms as f64 / events.len() as f64 / 1000.0 / 60.0;
    Some((minutes * 100.0).round() / 100.0)
}

/// Events per local start hour.
pub fn hourly_histogram(events: &[&Event], tz: &Tz) -> [usize; 24] {
    let mut histogram = [0usize; 24];
    for event in events {
        histogram[event.local_start(tz).hour() as usize] += 1;
    }
    histogram
}

/// Busiest start hour of the day, if any event exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeakHour(Option<u32>);

impl PeakHour {
    pub fn new(hour: Option<u32>) -> Self {
        Self(hour.map(|h| h % 24))
    }

    pub fn hour(&self) -> Option<u32> {
        self.0
    }
}

impl fmt::Display for PeakHour {
    /// `"09:00 - 10:00"`; the closing hour is unpadded and wraps at 24
    /// (`"23:00 - 0:00"`). `"N/A"` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(hour) => write!(f, "{:02}:00 - {}:00", hour, (hour + 1) % 24),
            None => f.write_str("N/A"),
        }
    }
}

/// Hour with the most event starts; ties go to the earliest hour.
pub fn peak_usage_hour(events: &[&Event], tz: &Tz) -> PeakHour {
    let histogram = hourly_histogram(events, tz);
    let mut best: Option<(u32, usize)> = None;
    for (hour, &count) in histogram.iter().enumerate() {
        if count == 0 {
            continue;
        }
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((hour as u32, count));
        }
    }
    PeakHour::new(best.map(|(hour, _)| hour))
}
