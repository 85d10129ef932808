//! Daytime schedules — named spans of the day, each carrying a light
//! setting and an auto-off delay.
//!
//! Spans are half-open: an entry is active from its start up to the next
//! entry's start, and the latest one wraps past midnight until the
//! earliest begins.

use std::time::Duration;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::entity::EntityRef;
use crate::error::ConfigError;
use crate::time::parse_time_of_day;

/// Auto-off delay in seconds when neither the room nor the daytime sets one.
pub const DEFAULT_DELAY_SECS: u64 = 150;

/// Auto-off delay as a [`Duration`], see [`DEFAULT_DELAY_SECS`].
pub const DEFAULT_DELAY: Duration = Duration::from_secs(DEFAULT_DELAY_SECS);

/// Brightness percent applied when a daytime sets no light value.
pub const DEFAULT_BRIGHTNESS: u8 = 100;

/// One daytime as written in configuration, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaytimeSpec {
    /// Start of the span, `HH:MM` or `HH:MM:SS`.
    pub starttime: String,
    /// Label used in logs and errors; positional `daytime_{index}` otherwise.
    #[serde(default)]
    pub name: Option<String>,
    /// Brightness percent or scene name.
    #[serde(default)]
    pub light: Option<LightSpec>,
    /// Span-specific auto-off delay in seconds.
    #[serde(default)]
    pub delay: Option<u64>,
}

impl DaytimeSpec {
    #[must_use]
    pub fn new(starttime: impl Into<String>) -> Self {
        Self {
            starttime: starttime.into(),
            name: None,
            light: None,
            delay: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_brightness(mut self, percent: i64) -> Self {
        self.light = Some(LightSpec::Brightness(percent));
        self
    }

    #[must_use]
    pub fn with_light_name(mut self, name: impl Into<String>) -> Self {
        self.light = Some(LightSpec::Named(name.into()));
        self
    }

    #[must_use]
    pub fn with_delay_secs(mut self, secs: u64) -> Self {
        self.delay = Some(secs);
        self
    }
}

/// The schedule applied when a room configures none.
#[must_use]
pub fn default_daytimes() -> Vec<DaytimeSpec> {
    vec![
        DaytimeSpec::new("05:30").named("morning").with_brightness(25),
        DaytimeSpec::new("07:30").named("day").with_brightness(100),
        DaytimeSpec::new("20:30").named("evening").with_brightness(90),
        DaytimeSpec::new("22:30").named("night").with_brightness(0),
    ]
}

/// Raw light value from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LightSpec {
    /// Brightness percent, validated to 0..=100 during schedule build.
    Brightness(i64),
    /// Scene entity reference or bare scene name.
    Named(String),
}

/// Resolved action applied while a daytime span is occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightSetting {
    /// Turn lights on at this percent; zero keeps them off.
    Brightness(u8),
    /// Activate a scene entity at the start of an occupancy period.
    Scene(EntityRef),
    /// Recall a scene by name on hue group lights.
    HueScene(String),
}

impl std::fmt::Display for LightSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Brightness(percent) => write!(f, "brightness({percent}%)"),
            Self::Scene(entity) => write!(f, "scene({entity})"),
            Self::HueScene(name) => write!(f, "hue_scene({name})"),
        }
    }
}

/// A validated daytime span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaytimeEntry {
    pub name: String,
    pub start: NaiveTime,
    pub delay: Duration,
    pub light: LightSetting,
}

/// A full day of validated spans, sorted by start time. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    entries: Vec<DaytimeEntry>,
}

impl Schedule {
    /// Validates raw daytimes and sorts them by start time.
    ///
    /// Names default to the position in configuration order, delays to
    /// `default_delay` and lights to [`DEFAULT_BRIGHTNESS`] percent. A bare
    /// light name becomes a hue scene when `any_hue_group` is set and a
    /// `scene.`-prefixed entity reference otherwise.
    ///
    /// # Errors
    ///
    /// Fails on an empty list, an unparseable start time, duplicate start
    /// times, a brightness outside 0..=100 or a malformed scene reference.
    pub fn build(
        specs: &[DaytimeSpec],
        default_delay: Duration,
        any_hue_group: bool,
    ) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::EmptyDaytimes);
        }
        let mut entries: Vec<DaytimeEntry> = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            let name = spec
                .name
                .clone()
                .unwrap_or_else(|| format!("daytime_{index}"));
            let start = parse_time_of_day(&spec.starttime).map_err(|source| {
                ConfigError::InvalidStartTime {
                    name: name.clone(),
                    value: spec.starttime.clone(),
                    source,
                }
            })?;
            if entries.iter().any(|existing| existing.start == start) {
                return Err(ConfigError::DuplicateStartTime { start });
            }
            let delay = spec.delay.map_or(default_delay, Duration::from_secs);
            let light = resolve_light(&name, spec.light.as_ref(), any_hue_group)?;
            entries.push(DaytimeEntry {
                name,
                start,
                delay,
                light,
            });
        }
        entries.sort_by_key(|entry| entry.start);
        Ok(Self { entries })
    }

    /// All spans in ascending start order.
    #[must_use]
    pub fn entries(&self) -> &[DaytimeEntry] {
        &self.entries
    }

    /// The span covering `now`.
    ///
    /// Times before the first start belong to the previous day's final
    /// span.
    #[must_use]
    pub fn active_index_at(&self, now: NaiveTime) -> usize {
        let started = self.entries.partition_point(|entry| entry.start <= now);
        started.checked_sub(1).unwrap_or(self.entries.len() - 1)
    }

    /// The span at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is outside the schedule; indices obtained from
    /// [`Schedule::active_index_at`] are always valid.
    #[must_use]
    pub fn entry(&self, index: usize) -> &DaytimeEntry {
        &self.entries[index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn resolve_light(
    name: &str,
    spec: Option<&LightSpec>,
    any_hue_group: bool,
) -> Result<LightSetting, ConfigError> {
    match spec {
        None => Ok(LightSetting::Brightness(DEFAULT_BRIGHTNESS)),
        Some(LightSpec::Brightness(value)) => u8::try_from(*value)
            .ok()
            .filter(|percent| *percent <= 100)
            .map(LightSetting::Brightness)
            .ok_or_else(|| ConfigError::BrightnessOutOfRange {
                name: name.to_string(),
                value: *value,
            }),
        Some(LightSpec::Named(raw)) => {
            if raw.starts_with("scene.") {
                Ok(LightSetting::Scene(EntityRef::new(raw.clone())?))
            } else if any_hue_group {
                Ok(LightSetting::HueScene(raw.clone()))
            } else {
                Ok(LightSetting::Scene(EntityRef::new(format!("scene.{raw}"))?))
            }
        }
    }
}
