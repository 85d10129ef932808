//! # motionluxd — motionlux daemon
//!
//! Composition root that wires the adapters together and runs one
//! automation per configured room.
//!
//! ## Responsibilities
//! - Load configuration (`motionlux.toml`, env vars)
//! - Initialize tracing
//! - Construct the hub adapter and, in demo mode, seed it with each room's
//!   entities and simulated motion
//! - Resolve every room against the hub and spawn its event loop
//! - Run until SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod demo;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use motionlux_adapter_virtual::VirtualHub;
use motionlux_app::ports::Hub;
use motionlux_app::room::RoomAutomation;
use motionlux_app::runner::RoomRunner;
use motionlux_app::timers::TokioTimerService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let hub = Arc::new(VirtualHub::new());
    if config.demo.enabled {
        demo::seed(&hub, &config.rooms).context("seeding the demo hub")?;
    }

    let mut rooms = tokio::task::JoinSet::new();
    for options in config.rooms.clone() {
        let room = options.room.clone();
        let hub_events = hub.subscribe();
        let (timers, room_events) = TokioTimerService::channel();
        let automation = RoomAutomation::initialize(Arc::clone(&hub), timers, options)
            .await
            .with_context(|| format!("initializing room {room:?}"))?;
        rooms.spawn(RoomRunner::new(automation, hub_events, room_events).run());
    }
    if rooms.is_empty() {
        tracing::warn!("no rooms configured, nothing to automate");
        return Ok(());
    }

    if config.demo.enabled {
        demo::spawn_simulators(
            &hub,
            &config.rooms,
            Duration::from_secs(config.demo.motion_interval_secs),
        )
        .context("starting the motion simulators")?;
    }

    tracing::info!(rooms = rooms.len(), "motionluxd running");
    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    tracing::info!("shutting down");
    rooms.shutdown().await;
    Ok(())
}
