//! # motionlux-adapter-virtual
//!
//! Virtual/demo hub that keeps all entities in memory, for testing and
//! demonstration.
//!
//! States are plain strings like on a real backend, light commands update
//! the table and are recorded for inspection, and every change is pushed to
//! subscribers as a [`HubEvent`]. A small simulator task can trip a motion
//! sensor periodically so a demo setup has something to react to.
//!
//! ## Dependency rule
//!
//! Depends on `motionlux-app` (port traits) and `motionlux-domain` only.

mod simulator;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use motionlux_app::ports::Hub;
use motionlux_domain::entity::{EntityRef, StateValue};
use motionlux_domain::error::HubError;
use motionlux_domain::event::HubEvent;
use tokio::sync::broadcast;

pub use simulator::spawn_motion_simulator;

/// A light command accepted by the virtual hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    TurnOn {
        entity: EntityRef,
        brightness: Option<u8>,
    },
    TurnOff {
        entity: EntityRef,
    },
    Scene {
        scene: EntityRef,
    },
    HueScene {
        group: String,
        scene: String,
    },
}

#[derive(Debug, Clone)]
struct VirtualEntity {
    state: StateValue,
    friendly_name: String,
    hue_group: bool,
}

/// In-memory hub backend.
pub struct VirtualHub {
    entities: Mutex<HashMap<EntityRef, VirtualEntity>>,
    commands: Mutex<Vec<Command>>,
    events: broadcast::Sender<HubEvent>,
}

impl Default for VirtualHub {
    fn default() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            entities: Mutex::new(HashMap::new()),
            commands: Mutex::new(Vec::new()),
            events,
        }
    }
}

impl VirtualHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity with an initial state.
    pub fn add_entity(
        &self,
        entity: EntityRef,
        friendly_name: impl Into<String>,
        state: StateValue,
    ) {
        self.entities.lock().unwrap().insert(
            entity,
            VirtualEntity {
                state,
                friendly_name: friendly_name.into(),
                hue_group: false,
            },
        );
    }

    /// Register a light group entity exposing named hue scenes.
    pub fn add_hue_group(
        &self,
        entity: EntityRef,
        friendly_name: impl Into<String>,
        state: StateValue,
    ) {
        self.entities.lock().unwrap().insert(
            entity,
            VirtualEntity {
                state,
                friendly_name: friendly_name.into(),
                hue_group: true,
            },
        );
    }

    /// Overwrite an entity's state and notify subscribers.
    ///
    /// # Errors
    ///
    /// Fails when the entity is not registered.
    pub fn set_state(&self, entity: &EntityRef, state: StateValue) -> Result<(), HubError> {
        let old = {
            let mut entities = self.entities.lock().unwrap();
            let found = entities
                .get_mut(entity)
                .ok_or_else(|| HubError::UnknownEntity {
                    entity: entity.clone(),
                })?;
            std::mem::replace(&mut found.state, state.clone())
        };
        let _ = self.events.send(HubEvent::StateChanged {
            entity: entity.clone(),
            old: Some(old),
            new: state,
        });
        Ok(())
    }

    /// Emit a discrete motion event for an event-style sensor.
    ///
    /// # Errors
    ///
    /// Fails when the sensor is not registered.
    pub fn pulse_motion(&self, sensor: &EntityRef) -> Result<(), HubError> {
        if !self.entities.lock().unwrap().contains_key(sensor) {
            return Err(HubError::UnknownEntity {
                entity: sensor.clone(),
            });
        }
        let _ = self.events.send(HubEvent::MotionDetected {
            entity: sensor.clone(),
        });
        Ok(())
    }

    /// Every command accepted so far, oldest first.
    #[must_use]
    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    fn lookup(&self, entity: &EntityRef) -> Result<VirtualEntity, HubError> {
        self.entities
            .lock()
            .unwrap()
            .get(entity)
            .cloned()
            .ok_or_else(|| HubError::UnknownEntity {
                entity: entity.clone(),
            })
    }

    fn apply_state(&self, entity: &EntityRef, state: StateValue) {
        let old = {
            let mut entities = self.entities.lock().unwrap();
            let Some(found) = entities.get_mut(entity) else {
                return;
            };
            std::mem::replace(&mut found.state, state.clone())
        };
        let _ = self.events.send(HubEvent::StateChanged {
            entity: entity.clone(),
            old: Some(old),
            new: state,
        });
    }
}

impl Hub for VirtualHub {
    fn entity_ids(&self) -> impl Future<Output = Result<Vec<EntityRef>, HubError>> + Send {
        let ids: Vec<_> = self.entities.lock().unwrap().keys().cloned().collect();
        async { Ok(ids) }
    }

    fn exists(&self, entity: &EntityRef) -> impl Future<Output = Result<bool, HubError>> + Send {
        let known = self.entities.lock().unwrap().contains_key(entity);
        async move { Ok(known) }
    }

    fn state_of(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<StateValue, HubError>> + Send {
        let result = self.lookup(entity).map(|found| found.state);
        async { result }
    }

    fn friendly_name(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<String, HubError>> + Send {
        let result = self.lookup(entity).map(|found| found.friendly_name);
        async { result }
    }

    fn is_hue_group(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<bool, HubError>> + Send {
        let result = self.lookup(entity).map(|found| found.hue_group);
        async { result }
    }

    fn turn_on(
        &self,
        entity: &EntityRef,
        brightness: Option<u8>,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        self.apply_state(entity, StateValue::on());
        self.commands.lock().unwrap().push(Command::TurnOn {
            entity: entity.clone(),
            brightness,
        });
        async { Ok(()) }
    }

    fn turn_off(&self, entity: &EntityRef) -> impl Future<Output = Result<(), HubError>> + Send {
        self.apply_state(entity, StateValue::off());
        self.commands.lock().unwrap().push(Command::TurnOff {
            entity: entity.clone(),
        });
        async { Ok(()) }
    }

    fn activate_scene(
        &self,
        scene: &EntityRef,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        self.commands.lock().unwrap().push(Command::Scene {
            scene: scene.clone(),
        });
        async { Ok(()) }
    }

    fn activate_hue_scene(
        &self,
        group_name: &str,
        scene_name: &str,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        self.commands.lock().unwrap().push(Command::HueScene {
            group: group_name.to_string(),
            scene: scene_name.to_string(),
        });
        async { Ok(()) }
    }

    fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.events.subscribe()
    }
}
