//! # motionlux-domain
//!
//! Pure domain model for the motionlux lighting automation engine.
//!
//! ## Responsibilities
//! - Foundational types: entity references, raw state values, time-of-day helpers
//! - Define **daytimes** (named, time-bounded lighting presets) and the
//!   validated [`Schedule`](daytime::Schedule) over them
//! - Define **motion signals** and **hub events** as plain data
//! - Define the per-room configuration input ([`RoomOptions`](config::RoomOptions))
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod config;
pub mod daytime;
pub mod entity;
pub mod error;
pub mod event;
pub mod motion;
pub mod time;
