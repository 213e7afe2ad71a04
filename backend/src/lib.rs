//! # Room Usage
//!
//! Room-booking analytics engine for a department calendar.
//!
//! Given a list of calendar events, the crate selects the events inside the
//! current day, week or month, narrows them with title keyword filters and a
//! free-text search, and aggregates them into per-room usage counts broken
//! down by program (CPE, MCPE, ISNE), chart series and summary statistics.
//! An optional axum server exposes the same computation as a REST API.
//!
//! ## Architecture
//!
//! - [`models`]: Events, categories, filters and time windows
//! - [`services`]: Filtering, aggregation, chart series and the summary pipeline
//! - [`parsing`]: JSON event list decoding
//! - [`source`]: Where events come from (in memory or a JSON file)
//! - [`config`]: `room-usage.toml` and environment overrides
//! - [`error`]: Crate error type
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use room_usage::config::DashboardSettings;
//! use room_usage::models::WindowMode;
//! use room_usage::services::{build_summary, SummaryRequest};
//!
//! let summary = build_summary(
//!     &[],
//!     &SummaryRequest::new(WindowMode::Week),
//!     Utc::now(),
//!     &DashboardSettings::default(),
//! );
//! assert_eq!(summary.total_events, 0);
//! assert_eq!(summary.statistics.peak_hour, "N/A");
//! ```

// DashboardError carries an ErrorContext on every variant
#![allow(clippy::result_large_err)]

pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod services;
pub mod source;

#[cfg(feature = "http-server")]
pub mod http;
