//! Time window selection.
//!
//! A [`TimeWindow`] is an inclusive `[start, end]` pair in the dashboard's
//! local zone. `end` is the last millisecond before the next period begins,
//! so an event starting exactly at the next local midnight is outside.
//!
//! A window with a missing bound is "unbounded" and matches nothing; it is
//! what an unrecognized mode name produces.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DashboardError, ErrorContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    #[default]
    #[serde(alias = "today")]
    Day,
    Week,
    Month,
}

impl WindowMode {
    /// Next mode in the day -> week -> month -> day cycle.
    pub fn next(self) -> Self {
        match self {
            WindowMode::Day => WindowMode::Week,
            WindowMode::Week => WindowMode::Month,
            WindowMode::Month => WindowMode::Day,
        }
    }

    /// Capitalized label shown next to the mode switch.
    pub fn label(self) -> &'static str {
        match self {
            WindowMode::Day => "Today",
            WindowMode::Week => "Week",
            WindowMode::Month => "Month",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WindowMode::Day => "day",
            WindowMode::Week => "week",
            WindowMode::Month => "month",
        }
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowMode {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "today" => Ok(WindowMode::Day),
            "week" => Ok(WindowMode::Week),
            "month" => Ok(WindowMode::Month),
            other => Err(DashboardError::InvalidRequest {
                message: format!("Unknown window mode `{}`", other),
                context: ErrorContext::new("parse_window_mode")
                    .with_details("expected day, week or month"),
            }),
        }
    }
}

/// First day of the calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn days_into_week(self, weekday: Weekday) -> i64 {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday() as i64,
            WeekStart::Monday => weekday.num_days_from_monday() as i64,
        }
    }
}

impl FromStr for WeekStart {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(DashboardError::configuration(format!(
                "Unsupported week start `{}`; expected sunday or monday",
                other
            ))),
        }
    }
}

/// Inclusive instant range; both bounds present or the window is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeWindow {
    pub start: Option<DateTime<Tz>>,
    pub end: Option<DateTime<Tz>>,
}

impl TimeWindow {
    /// Window that excludes every event.
    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Current day, week or month around `now`, in `now`'s zone.
    pub fn for_mode(mode: WindowMode, now: DateTime<Tz>, week_start: WeekStart) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();

        let (first_day, next_first_day) = match mode {
            WindowMode::Day => (Some(today), today.succ_opt()),
            WindowMode::Week => {
                let first = today - Duration::days(week_start.days_into_week(today.weekday()));
                (Some(first), first.checked_add_signed(Duration::days(7)))
            }
            WindowMode::Month => {
                let first = today.with_day(1);
                let next = first.and_then(next_month);
                (first, next)
            }
        };

        let start = first_day.and_then(|d| local_midnight(&tz, d));
        let end = next_first_day
            .and_then(|d| local_midnight(&tz, d))
            .map(|next| next - Duration::milliseconds(1));

        match (start, end) {
            (Some(start), Some(end)) => Self {
                start: Some(start),
                end: Some(end),
            },
            _ => {
                log::warn!("Could not resolve {} window around {}", mode, now);
                Self::unbounded()
            }
        }
    }

    /// Resolve a mode by name; an unknown name yields an unbounded window.
    pub fn for_mode_name(name: &str, now: DateTime<Tz>, week_start: WeekStart) -> Self {
        match name.parse::<WindowMode>() {
            Ok(mode) => Self::for_mode(mode, now, week_start),
            Err(e) => {
                log::warn!("{}; excluding all events", e);
                Self::unbounded()
            }
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Inclusive containment; always false for an unbounded window.
    pub fn contains<T: TimeZone>(&self, instant: &DateTime<T>) -> bool {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => start <= instant && instant <= end,
            _ => false,
        }
    }
}

fn next_month(first: NaiveDate) -> Option<NaiveDate> {
    if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
}

/// First valid local instant of `date`.
///
/// When a DST jump skips midnight, the earliest existing instant within the
/// following hours is used instead.
fn local_midnight(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    (0..=3).find_map(|hours| {
        tz.from_local_datetime(&(midnight + Duration::hours(hours)))
            .earliest()
    })
}
