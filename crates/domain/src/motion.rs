//! Motion signals fed into the occupancy state machine.

use serde::{Deserialize, Serialize};

/// A single motion report, normalized from either listener style.
///
/// Event-style sensors re-fire while motion continues and never report a
/// matching clear; level sensors hold an on-state and emit one edge in each
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionSignal {
    /// Discrete event-style report with no matching clear.
    Pulse,
    /// A level sensor switched to its configured on-state.
    Detected,
    /// A level sensor switched to its configured off-state.
    Cleared,
}
