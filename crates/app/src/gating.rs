//! Ambient gates that veto light commands.
//!
//! The on-gate is fail-closed: an unreadable illuminance sensor vetoes the
//! turn-on. The off-gate is fail-open: unreadable humidity sensors are
//! skipped and only a readable, humid one blocks the turn-off.

use motionlux_domain::entity::EntityRef;

/// Numeric reading from one sensor; `None` when missing or non-numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub sensor: EntityRef,
    pub value: Option<f64>,
}

/// Verdict for turning lights on.
#[derive(Debug, Clone, PartialEq)]
pub enum OnGate {
    Allowed,
    /// Ambient light at or above the threshold on these sensors.
    TooBright(Vec<EntityRef>),
    /// This sensor's state does not parse as a number.
    Unreadable(EntityRef),
}

/// Verdict for turning lights off.
#[derive(Debug, Clone, PartialEq)]
pub enum OffGate {
    Allowed,
    /// Humidity at or above the threshold on this sensor.
    Humid(EntityRef),
}

/// Thresholds gating the room's light commands.
///
/// A `None` threshold disables that gate; readings passed for it are
/// ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GatePolicy {
    pub illuminance_threshold: Option<f64>,
    pub humidity_threshold: Option<f64>,
}

impl GatePolicy {
    /// Verdict for turning lights on, given current illuminance readings.
    #[must_use]
    pub fn check_turn_on(&self, illuminance: &[SensorReading]) -> OnGate {
        let Some(threshold) = self.illuminance_threshold else {
            return OnGate::Allowed;
        };
        let mut blockers = Vec::new();
        for reading in illuminance {
            match reading.value {
                None => return OnGate::Unreadable(reading.sensor.clone()),
                Some(value) if value >= threshold => blockers.push(reading.sensor.clone()),
                Some(_) => {}
            }
        }
        if blockers.is_empty() {
            OnGate::Allowed
        } else {
            OnGate::TooBright(blockers)
        }
    }

    /// Verdict for turning lights off, given current humidity readings.
    #[must_use]
    pub fn check_turn_off(&self, humidity: &[SensorReading]) -> OffGate {
        let Some(threshold) = self.humidity_threshold else {
            return OffGate::Allowed;
        };
        for reading in humidity {
            if let Some(value) = reading.value {
                if value >= threshold {
                    return OffGate::Humid(reading.sensor.clone());
                }
            }
        }
        OffGate::Allowed
    }
}
