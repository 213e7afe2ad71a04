//! Room usage HTTP server binary.
//!
//! Loads configuration, builds the configured event source, and serves the
//! summary API.
//!
//! # Usage
//!
//! ```bash
//! # Serve an exported event list
//! EVENTS_FILE=events.json DASHBOARD_TIMEZONE=Asia/Bangkok \
//!   cargo run --bin room-usage-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `EVENTS_FILE`: JSON event file; switches the source to `file`
//! - `DASHBOARD_TIMEZONE`: IANA zone for windows and hours (default: UTC)
//! - `DASHBOARD_WEEK_START`: `sunday` (default) or `monday`
//! - `RUST_LOG`: Log level (default: info)
//!
//! Values not set in the environment come from `room-usage.toml`.

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use room_usage::config::DashboardConfig;
use room_usage::http::{create_router, AppState};
use room_usage::source::SourceFactory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting room usage server");

    let config = DashboardConfig::load()?;
    let source = SourceFactory::create(&config.source)?;
    info!(
        source = source.name(),
        timezone = %config.dashboard.timezone,
        "Event source initialized"
    );

    let state = AppState::new(source, config.dashboard);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
