use chrono::{DateTime, Duration, FixedOffset};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Date layout used for list rendering and date search (`3/5/2024`).
pub const DATE_FORMAT: &str = "%-m/%-d/%Y";
/// Time layout used for list rendering and time search (`9:05:00 AM`).
pub const TIME_FORMAT: &str = "%-I:%M:%S %p";

/// Upstream calendar event identifier.
///
/// The calendar API serves string ids; some exports carry plain integers,
/// which are accepted and kept in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for EventId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrInt {
            String(String),
            Int(i64),
        }

        Ok(match StringOrInt::deserialize(deserializer)? {
            StringOrInt::String(s) => EventId(s),
            StringOrInt::Int(i) => EventId(i.to_string()),
        })
    }
}

/// A single room booking as delivered by the calendar API.
///
/// `start_dt <= end_dt` is assumed but not checked; a reversed event simply
/// contributes a negative duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub start_dt: DateTime<FixedOffset>,
    pub end_dt: DateTime<FixedOffset>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub who: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl Event {
    /// Location, treating an empty string the same as a missing one.
    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    pub fn who(&self) -> Option<&str> {
        non_empty(&self.who)
    }

    pub fn notes(&self) -> Option<&str> {
        non_empty(&self.notes)
    }

    pub fn duration(&self) -> Duration {
        self.end_dt.signed_duration_since(self.start_dt)
    }

    /// Start instant expressed in the dashboard's local zone.
    pub fn local_start(&self, tz: &Tz) -> DateTime<Tz> {
        self.start_dt.with_timezone(tz)
    }

    pub fn local_end(&self, tz: &Tz) -> DateTime<Tz> {
        self.end_dt.with_timezone(tz)
    }

    pub fn start_date_label(&self, tz: &Tz) -> String {
        self.local_start(tz).format(DATE_FORMAT).to_string()
    }

    pub fn start_time_label(&self, tz: &Tz) -> String {
        self.local_start(tz).format(TIME_FORMAT).to_string()
    }

    pub fn end_time_label(&self, tz: &Tz) -> String {
        self.local_end(tz).format(TIME_FORMAT).to_string()
    }
}
