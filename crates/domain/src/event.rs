//! Events emitted by a hub over its event stream, and the scheduled
//! occurrences a room reacts to.

use crate::entity::{EntityRef, StateValue};

/// An observation from the hub, pushed to every subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubEvent {
    /// An entity's state moved from `old` to `new`.
    StateChanged {
        entity: EntityRef,
        old: Option<StateValue>,
        new: StateValue,
    },
    /// A discrete motion event with no associated state transition.
    MotionDetected { entity: EntityRef },
}

impl HubEvent {
    /// The entity this event concerns.
    #[must_use]
    pub fn entity(&self) -> &EntityRef {
        match self {
            Self::StateChanged { entity, .. } | Self::MotionDetected { entity } => entity,
        }
    }
}

/// A scheduled occurrence delivered back to the room that requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomEvent {
    /// The auto-off grace delay ran out without new motion.
    DelayElapsed,
    /// The daytime span at `index` of the room's schedule began.
    DaytimeStarted { index: usize },
}
