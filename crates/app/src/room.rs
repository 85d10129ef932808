//! Room automation engine — turns motion into light commands.
//!
//! One [`RoomAutomation`] owns everything a room needs: its resolved
//! entities, the validated daytime schedule, the currently active span and
//! the handles of pending auto-off timers. Exactly one task drives a value
//! of this type, so there is no internal locking.

use std::time::Duration;

use motionlux_domain::config::RoomOptions;
use motionlux_domain::daytime::{DaytimeEntry, LightSetting, Schedule};
use motionlux_domain::entity::EntityRef;
use motionlux_domain::error::{ConfigError, MotionluxError};
use motionlux_domain::event::{HubEvent, RoomEvent};
use motionlux_domain::motion::MotionSignal;
use motionlux_domain::time::now_local;

use crate::discovery::{
    self, KEYWORD_HUMIDITY, KEYWORD_ILLUMINANCE, KEYWORD_LIGHTS, KEYWORD_MOTION, NamedEntity,
};
use crate::gating::{GatePolicy, OffGate, OnGate, SensorReading};
use crate::ports::{Hub, TimerService};

/// Daily daytime triggers fire within this much of their start time.
pub const DAYTIME_JITTER: Duration = Duration::from_secs(5);

/// State strings reported by a level motion sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MotionStates {
    on: String,
    off: String,
}

/// Motion-activated lighting control for one room.
#[derive(Debug)]
pub struct RoomAutomation<H, T>
where
    H: Hub,
    T: TimerService,
{
    hub: H,
    timers: T,
    room: String,
    lights: Vec<EntityRef>,
    motion_sensors: Vec<EntityRef>,
    illuminance_sensors: Vec<EntityRef>,
    humidity_sensors: Vec<EntityRef>,
    disable_switches: Vec<EntityRef>,
    motion_states: Option<MotionStates>,
    gates: GatePolicy,
    schedule: Schedule,
    active: usize,
    handles: Vec<T::Handle>,
}

impl<H, T> RoomAutomation<H, T>
where
    H: Hub,
    T: TimerService,
{
    /// Resolve `options` against the hub and install the daily daytime
    /// triggers.
    ///
    /// Entity lists left empty in `options` are filled in by
    /// convention-based discovery, with `light.{room}` preferred over
    /// individual lights when it exists. Thresholds without a matching
    /// sensor are dropped with a warning. Ends by arming the auto-off timer
    /// so lights already on at startup go off eventually.
    ///
    /// # Errors
    ///
    /// Fails when the room ends up without lights or motion sensors, when
    /// only one of the two level-sensor state strings is set, when the
    /// daytime schedule is invalid or when the hub cannot be queried.
    pub async fn initialize(
        hub: H,
        timers: T,
        options: RoomOptions,
    ) -> Result<Self, MotionluxError> {
        let room = options.room.clone();

        let motion_states = match (&options.motion_state_on, &options.motion_state_off) {
            (Some(on), Some(off)) => Some(MotionStates {
                on: on.clone(),
                off: off.clone(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::MotionStatesIncomplete.into()),
        };

        let inventory = discovery::inventory(&hub).await?;

        let lights = if options.lights.is_empty() {
            let group = EntityRef::new(format!("light.{room}")).map_err(ConfigError::from)?;
            if hub.exists(&group).await.unwrap_or(false) {
                vec![group]
            } else {
                discovery::find_for_room(&inventory, &room, KEYWORD_LIGHTS)
            }
        } else {
            options.lights.clone()
        };
        if lights.is_empty() {
            return Err(ConfigError::NoLights { room }.into());
        }

        let motion_sensors = if options.motion.is_empty() {
            discovery::find_for_room(&inventory, &room, KEYWORD_MOTION)
        } else {
            options.motion.clone()
        };
        if motion_sensors.is_empty() {
            return Err(ConfigError::NoMotionSensors { room }.into());
        }

        let (illuminance_sensors, illuminance_threshold) = resolve_gate_sensors(
            &room,
            "illuminance",
            &options.illuminance,
            options.illuminance_threshold,
            &inventory,
            KEYWORD_ILLUMINANCE,
        );
        let (humidity_sensors, humidity_threshold) = resolve_gate_sensors(
            &room,
            "humidity",
            &options.humidity,
            options.humidity_threshold,
            &inventory,
            KEYWORD_HUMIDITY,
        );

        let mut any_hue_group = false;
        for light in &lights {
            if hub.is_hue_group(light).await.unwrap_or(false) {
                any_hue_group = true;
                break;
            }
        }

        let schedule = Schedule::build(
            &options.daytimes,
            Duration::from_secs(options.delay),
            any_hue_group,
        )?;

        let active = schedule.active_index_at(now_local());
        for (index, entry) in schedule.entries().iter().enumerate() {
            timers.schedule_daily(entry.start, DAYTIME_JITTER, RoomEvent::DaytimeStarted { index });
        }

        let mut automation = Self {
            hub,
            timers,
            room,
            lights,
            motion_sensors,
            illuminance_sensors,
            humidity_sensors,
            disable_switches: options.disable_switches(),
            motion_states,
            gates: GatePolicy {
                illuminance_threshold,
                humidity_threshold,
            },
            schedule,
            active,
            handles: Vec::new(),
        };

        tracing::info!(
            room = %automation.room,
            lights = ?automation.lights,
            motion = ?automation.motion_sensors,
            humidity = ?automation.humidity_sensors,
            illuminance = ?automation.illuminance_sensors,
            disable_switches = ?automation.disable_switches,
            daytime = %automation.active_daytime().name,
            delay_secs = automation.active_daytime().delay.as_secs(),
            "room automation ready"
        );
        automation.refresh_timer();
        Ok(automation)
    }

    /// Room name.
    #[must_use]
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Lights controlled by this room.
    #[must_use]
    pub fn lights(&self) -> &[EntityRef] {
        &self.lights
    }

    /// Motion sensors observed by this room.
    #[must_use]
    pub fn motion_sensors(&self) -> &[EntityRef] {
        &self.motion_sensors
    }

    /// The daytime span currently in effect.
    #[must_use]
    pub fn active_daytime(&self) -> &DaytimeEntry {
        self.schedule.entry(self.active)
    }

    /// React to one hub event.
    ///
    /// Events from entities other than the room's motion sensors are
    /// ignored, as are state changes that match neither configured state
    /// string.
    ///
    /// # Errors
    ///
    /// Propagates hub failures from issued light commands.
    pub async fn handle_hub_event(&mut self, event: &HubEvent) -> Result<(), MotionluxError> {
        let Some(signal) = self.classify(event) else {
            return Ok(());
        };
        tracing::debug!(room = %self.room, entity = %event.entity(), ?signal, "motion signal");
        self.handle_motion(signal).await
    }

    /// React to one scheduled occurrence.
    ///
    /// # Errors
    ///
    /// Propagates hub failures from issued light commands.
    pub async fn handle_room_event(&mut self, event: RoomEvent) -> Result<(), MotionluxError> {
        match event {
            RoomEvent::DelayElapsed => self.lights_off().await,
            RoomEvent::DaytimeStarted { index } => {
                self.apply_daytime(index);
                Ok(())
            }
        }
    }

    fn classify(&self, event: &HubEvent) -> Option<MotionSignal> {
        if !self.motion_sensors.contains(event.entity()) {
            return None;
        }
        match (event, &self.motion_states) {
            (HubEvent::MotionDetected { .. }, None) => Some(MotionSignal::Pulse),
            (HubEvent::StateChanged { new, .. }, Some(states)) => {
                if new.as_str() == states.on {
                    Some(MotionSignal::Detected)
                } else if new.as_str() == states.off {
                    Some(MotionSignal::Cleared)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    async fn handle_motion(&mut self, signal: MotionSignal) -> Result<(), MotionluxError> {
        // Disabled rooms ignore motion entirely, pending timers included.
        if self.is_disabled().await {
            return Ok(());
        }
        match signal {
            MotionSignal::Pulse => {
                self.turn_on_unless_lit().await?;
                self.refresh_timer();
                Ok(())
            }
            MotionSignal::Detected => {
                self.cancel_timers();
                self.turn_on_unless_lit().await
            }
            MotionSignal::Cleared => {
                if self.all_sensors_clear().await {
                    self.refresh_timer();
                } else {
                    self.cancel_timers();
                }
                Ok(())
            }
        }
    }

    async fn turn_on_unless_lit(&mut self) -> Result<(), MotionluxError> {
        if self.any_light_on().await {
            tracing::debug!(room = %self.room, "lights already on");
            return Ok(());
        }
        self.lights_on().await
    }

    async fn lights_on(&mut self) -> Result<(), MotionluxError> {
        let readings = self.read_sensor_numbers(&self.illuminance_sensors).await;
        match self.gates.check_turn_on(&readings) {
            OnGate::Allowed => {}
            OnGate::TooBright(sensors) => {
                tracing::debug!(room = %self.room, ?sensors, "bright enough already, not turning on");
                return Ok(());
            }
            OnGate::Unreadable(sensor) => {
                tracing::warn!(room = %self.room, sensor = %sensor, "illuminance not readable, not turning on");
                return Ok(());
            }
        }

        let entry = self.active_daytime().clone();
        match &entry.light {
            LightSetting::Brightness(0) => return self.lights_off().await,
            LightSetting::Brightness(percent) => {
                for light in &self.lights {
                    if light.domain() == "switch" {
                        self.hub.turn_on(light, None).await?;
                    } else {
                        self.hub.turn_on(light, Some(*percent)).await?;
                    }
                }
            }
            LightSetting::Scene(scene) => {
                self.hub.activate_scene(scene).await?;
            }
            LightSetting::HueScene(scene_name) => {
                for light in &self.lights {
                    if self.hub.is_hue_group(light).await.unwrap_or(false) {
                        let group_name = self.hub.friendly_name(light).await?;
                        self.hub.activate_hue_scene(&group_name, scene_name).await?;
                    } else {
                        self.hub.turn_on(light, None).await?;
                    }
                }
            }
        }
        tracing::info!(
            room = %self.room,
            daytime = %entry.name,
            setting = %entry.light,
            delay_secs = entry.delay.as_secs(),
            "lights on"
        );
        Ok(())
    }

    async fn lights_off(&mut self) -> Result<(), MotionluxError> {
        if self.is_disabled().await {
            return Ok(());
        }

        let readings = self.read_sensor_numbers(&self.humidity_sensors).await;
        if let OffGate::Humid(sensor) = self.gates.check_turn_off(&readings) {
            self.refresh_timer();
            tracing::info!(room = %self.room, sensor = %sensor, "humidity above threshold, keeping lights on");
            return Ok(());
        }

        self.cancel_timers();
        if !self.any_light_on().await {
            return Ok(());
        }
        for light in &self.lights {
            self.hub.turn_off(light).await?;
        }
        tracing::info!(
            room = %self.room,
            delay_secs = self.active_daytime().delay.as_secs(),
            "no motion, lights off"
        );
        Ok(())
    }

    fn apply_daytime(&mut self, index: usize) {
        if index >= self.schedule.len() {
            return;
        }
        self.active = index;
        let entry = self.schedule.entry(index);
        tracing::info!(
            room = %self.room,
            daytime = %entry.name,
            setting = %entry.light,
            delay_secs = entry.delay.as_secs(),
            "daytime switched"
        );
    }

    /// Cancel pending auto-off timers and arm a fresh one.
    ///
    /// A zero delay means no auto-off; the lights then stay on until
    /// something else turns them off.
    fn refresh_timer(&mut self) {
        self.cancel_timers();
        let delay = self.active_daytime().delay;
        if !delay.is_zero() {
            let handle = self.timers.schedule_once(delay, RoomEvent::DelayElapsed);
            self.handles.push(handle);
        }
    }

    fn cancel_timers(&mut self) {
        for handle in std::mem::take(&mut self.handles) {
            self.timers.cancel(handle);
        }
    }

    async fn is_disabled(&self) -> bool {
        for switch in &self.disable_switches {
            let disabled = match self.hub.state_of(switch).await {
                Ok(state) => state.is_off() || state.is_empty(),
                Err(_) => true,
            };
            if disabled {
                tracing::debug!(room = %self.room, switch = %switch, "automation disabled");
                return true;
            }
        }
        false
    }

    async fn all_sensors_clear(&self) -> bool {
        let Some(states) = &self.motion_states else {
            return true;
        };
        for sensor in &self.motion_sensors {
            let clear = self
                .hub
                .state_of(sensor)
                .await
                .is_ok_and(|state| state.as_str() == states.off);
            if !clear {
                return false;
            }
        }
        true
    }

    async fn any_light_on(&self) -> bool {
        for light in &self.lights {
            if self
                .hub
                .state_of(light)
                .await
                .is_ok_and(|state| state.is_on())
            {
                return true;
            }
        }
        false
    }

    async fn read_sensor_numbers(&self, sensors: &[EntityRef]) -> Vec<SensorReading> {
        let mut readings = Vec::with_capacity(sensors.len());
        for sensor in sensors {
            let value = self
                .hub
                .state_of(sensor)
                .await
                .ok()
                .and_then(|state| state.number());
            readings.push(SensorReading {
                sensor: sensor.clone(),
                value,
            });
        }
        readings
    }
}

fn resolve_gate_sensors(
    room: &str,
    role: &str,
    configured: &[EntityRef],
    threshold: Option<f64>,
    inventory: &[NamedEntity],
    keyword: &str,
) -> (Vec<EntityRef>, Option<f64>) {
    let sensors = if configured.is_empty() {
        discovery::find_for_room(inventory, room, keyword)
    } else {
        configured.to_vec()
    };
    match threshold {
        Some(_) if sensors.is_empty() => {
            tracing::warn!(room, role, "no sensors found, disabling the threshold");
            (Vec::new(), None)
        }
        Some(value) => (sensors, Some(value)),
        None => (Vec::new(), None),
    }
}
