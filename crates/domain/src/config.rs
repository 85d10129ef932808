//! Per-room configuration.

use serde::{Deserialize, Serialize};

use crate::daytime::{DEFAULT_DELAY_SECS, DaytimeSpec, default_daytimes};
use crate::entity::EntityRef;

/// Settings for one automated room.
///
/// Every field except `room` has a working default; empty entity lists are
/// filled in by convention-based discovery at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOptions {
    /// Room name, matched against entity friendly names during discovery.
    pub room: String,
    /// Lights to control.
    #[serde(default)]
    pub lights: Vec<EntityRef>,
    /// Motion sensors to listen to.
    #[serde(default)]
    pub motion: Vec<EntityRef>,
    /// Humidity sensors that block auto-off.
    #[serde(default)]
    pub humidity: Vec<EntityRef>,
    /// Illuminance sensors that gate auto-on.
    #[serde(default)]
    pub illuminance: Vec<EntityRef>,
    /// State a level motion sensor reports while motion holds.
    ///
    /// Must be set together with `motion_state_off`; without the pair,
    /// motion sensors are treated as event-style.
    #[serde(default)]
    pub motion_state_on: Option<String>,
    /// State a level motion sensor reports once motion clears.
    #[serde(default)]
    pub motion_state_off: Option<String>,
    /// Auto-off stays blocked while any humidity sensor reads above this.
    #[serde(default)]
    pub humidity_threshold: Option<f64>,
    /// Auto-on is skipped while any illuminance sensor reads at or above this.
    #[serde(default)]
    pub illuminance_threshold: Option<f64>,
    /// Entities that suspend the whole room automation while off.
    #[serde(default)]
    pub disable_switch_entities: Vec<EntityRef>,
    /// Single-entity spelling of `disable_switch_entities`.
    #[serde(default)]
    pub disable_switch_entity: Option<EntityRef>,
    /// Room-wide auto-off delay in seconds; individual daytimes may
    /// override it. Zero disables auto-off entirely.
    #[serde(default = "default_delay")]
    pub delay: u64,
    /// Daytime schedule; a stock morning-to-night cycle when omitted.
    #[serde(default = "default_daytimes")]
    pub daytimes: Vec<DaytimeSpec>,
}

fn default_delay() -> u64 {
    DEFAULT_DELAY_SECS
}

impl RoomOptions {
    #[must_use]
    pub fn new(room: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            lights: Vec::new(),
            motion: Vec::new(),
            humidity: Vec::new(),
            illuminance: Vec::new(),
            motion_state_on: None,
            motion_state_off: None,
            humidity_threshold: None,
            illuminance_threshold: None,
            disable_switch_entities: Vec::new(),
            disable_switch_entity: None,
            delay: DEFAULT_DELAY_SECS,
            daytimes: default_daytimes(),
        }
    }

    /// All disable switches, with the single-entity spelling merged in.
    #[must_use]
    pub fn disable_switches(&self) -> Vec<EntityRef> {
        let mut switches = self.disable_switch_entities.clone();
        if let Some(single) = &self.disable_switch_entity {
            if !switches.contains(single) {
                switches.push(single.clone());
            }
        }
        switches
    }
}
