//! Entity references and raw state values.
//!
//! motionlux never owns entities; it refers to them by the hub's
//! `domain.object` identifiers and reads their states as opaque strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidEntityRef;

/// Reference to an entity in `domain.object` form
/// (`light.bad`, `binary_sensor.motion_sensor_bad`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityRef(String);

impl EntityRef {
    /// Validate and wrap a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEntityRef`] unless the identifier consists of a
    /// non-empty domain and a non-empty object id separated by a dot.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidEntityRef> {
        let raw = raw.into();
        match raw.split_once('.') {
            Some((domain, object)) if !domain.is_empty() && !object.is_empty() => Ok(Self(raw)),
            _ => Err(InvalidEntityRef(raw)),
        }
    }

    /// The full `domain.object` identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The domain part (`light` in `light.bad`).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('.').map_or("", |(domain, _)| domain)
    }

    /// The object id part (`bad` in `light.bad`).
    #[must_use]
    pub fn object_id(&self) -> &str {
        self.0.split_once('.').map_or("", |(_, object)| object)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityRef {
    type Err = InvalidEntityRef;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityRef {
    type Error = InvalidEntityRef;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<EntityRef> for String {
    fn from(entity: EntityRef) -> Self {
        entity.0
    }
}

/// Raw state report for an entity, exactly as the hub delivers it
/// (`"on"`, `"off"`, `"61.0"`, …).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateValue(String);

impl StateValue {
    /// Wrap a raw state string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The canonical `"on"` state.
    #[must_use]
    pub fn on() -> Self {
        Self("on".to_string())
    }

    /// The canonical `"off"` state.
    #[must_use]
    pub fn off() -> Self {
        Self("off".to_string())
    }

    /// The raw state string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the state is the canonical `"on"`.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.0 == "on"
    }

    /// Whether the state is the canonical `"off"`.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.0 == "off"
    }

    /// Whether the hub delivered an empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The state parsed as a number, if it is one.
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateValue {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
