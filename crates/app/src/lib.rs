//! # motionlux-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Hub` — read entity states, issue light commands, stream events
//!   - `TimerService` — one-shot auto-off timers and daily daytime triggers
//! - Provide the **room automation engine**:
//!   - `RoomAutomation` — resolves a room's configuration against the hub and
//!     turns motion into light commands
//!   - `RoomRunner` — the per-room event loop delivering hub and timer events
//!     to the engine one at a time
//! - Provide **in-process infrastructure** (tokio timers) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* the hub talks to devices
//!
//! ## Dependency rule
//! Depends on `motionlux-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod discovery;
pub mod gating;
pub mod ports;
pub mod room;
pub mod runner;
pub mod timers;
