#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use room_usage::config::DashboardSettings;
use room_usage::models::{Event, EventId, WeekStart};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Variables are restored on unwind, and access is serialized because the
/// process environment is shared between parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Bangkok dashboard with Sunday weeks.
pub fn bangkok() -> DashboardSettings {
    DashboardSettings {
        timezone: chrono_tz::Asia::Bangkok,
        week_start: WeekStart::Sunday,
    }
}

/// A wall-clock time in March 2024 at UTC+7.
pub fn march(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(7 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, day, hour, minute, 0)
        .unwrap()
}

pub fn create_test_event(
    id: &str,
    title: &str,
    location: Option<&str>,
    start: DateTime<FixedOffset>,
    minutes: i64,
) -> Event {
    Event {
        id: EventId::from(id),
        title: title.to_string(),
        start_dt: start,
        end_dt: start + Duration::minutes(minutes),
        location: location.map(str::to_string),
        who: None,
        notes: None,
    }
}

/// The same events as JSON, in the calendar API envelope.
pub const MARCH_EVENTS_JSON: &str = r#"{
    "events": [
        {
            "id": "1",
            "title": "cpe Lecture",
            "location": "Room A",
            "who": "Dr. Kasem",
            "start_dt": "2024-03-05T09:00:00+07:00",
            "end_dt": "2024-03-05T10:00:00+07:00"
        },
        {
            "id": "2",
            "title": "mcpe Lab",
            "location": "Room A",
            "start_dt": "2024-03-05T09:00:00+07:00",
            "end_dt": "2024-03-05T11:00:00+07:00"
        },
        {
            "id": "3",
            "title": "isne Seminar",
            "location": "Room B",
            "notes": "Guest speaker",
            "start_dt": "2024-03-07T13:00:00+07:00",
            "end_dt": "2024-03-07T14:30:00+07:00"
        },
        {
            "id": "4",
            "title": "Room reservation cpe",
            "location": "xxx-closet",
            "start_dt": "2024-03-20T15:00:00+07:00",
            "end_dt": "2024-03-20T16:00:00+07:00"
        },
        {
            "id": 5,
            "title": "Staff meeting",
            "start_dt": "2024-04-02T10:00:00+07:00",
            "end_dt": "2024-04-02T11:00:00+07:00"
        }
    ],
    "timestamp": 1709600000
}"#;
