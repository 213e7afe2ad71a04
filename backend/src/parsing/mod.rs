//! Parsers for calendar event payloads.
//!
//! - [`event_json`]: Parse the calendar API's JSON event list
//!
//! # Example
//!
//! ```no_run
//! use room_usage::parsing::event_json::parse_events_json;
//! use std::path::Path;
//!
//! let events = parse_events_json(Path::new("events.json"))
//!     .expect("Failed to parse events");
//! ```

pub mod event_json;


pub use event_json::{parse_events_json, parse_events_json_str, parse_events_value};
