//! Common error types used across the workspace.
//!
//! Each layer raises typed errors and converts upward via `#[from]`;
//! no stringly-typed variants.

use chrono::NaiveTime;

use crate::entity::EntityRef;

/// Top-level error for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum MotionluxError {
    /// Fatal configuration problem detected at startup.
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    /// A hub port request failed.
    #[error("hub request failed")]
    Hub(#[from] HubError),
}

/// Fatal configuration problems; initialization aborts on the first one.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Neither configured nor discoverable lights for the room.
    #[error("room {room:?}: no lights configured or found")]
    NoLights { room: String },

    /// Neither configured nor discoverable motion sensors for the room.
    #[error("room {room:?}: no motion sensors configured or found")]
    NoMotionSensors { room: String },

    /// A daytime start time that parses as neither `HH:MM` nor `HH:MM:SS`.
    #[error("daytime {name:?}: invalid start time {value:?}")]
    InvalidStartTime {
        name: String,
        value: String,
        #[source]
        source: chrono::format::ParseError,
    },

    /// Two daytimes sharing a start time.
    #[error("daytime start times must be unique, {start} appears twice")]
    DuplicateStartTime { start: NaiveTime },

    /// A brightness outside the 0–100 percent range.
    #[error("daytime {name:?}: brightness {value} is out of the 0-100 range")]
    BrightnessOutOfRange { name: String, value: i64 },

    /// A daytime schedule without a single entry.
    #[error("daytime schedule is empty")]
    EmptyDaytimes,

    /// Only one of the two level-sensor state strings configured.
    #[error("motion_state_on and motion_state_off must be set together")]
    MotionStatesIncomplete,

    /// A malformed entity reference.
    #[error(transparent)]
    InvalidEntityRef(#[from] InvalidEntityRef),
}

/// An entity reference that is not in `domain.object` form.
#[derive(Debug, thiserror::Error)]
#[error("invalid entity reference {0:?}, expected `domain.object`")]
pub struct InvalidEntityRef(pub String);

/// Failures reported by the hub port.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The hub knows no entity under this reference.
    #[error("unknown entity {entity}")]
    UnknownEntity { entity: EntityRef },

    /// The hub refused or failed an actuation call.
    #[error("command on {entity} was rejected: {reason}")]
    CommandRejected { entity: EntityRef, reason: String },
}
