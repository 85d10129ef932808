//! Hub port — entity observation and light actuation.
//!
//! A hub bridges an external home-automation backend (virtual, websocket,
//! MQTT, …) into the motionlux system. It answers state queries, executes
//! light commands and pushes [`HubEvent`]s to every subscriber.

use std::future::Future;

use motionlux_domain::entity::{EntityRef, StateValue};
use motionlux_domain::error::HubError;
use motionlux_domain::event::HubEvent;
use tokio::sync::broadcast;

/// Observes and actuates entities on one home-automation backend.
pub trait Hub {
    /// All entity ids the hub currently knows.
    fn entity_ids(&self) -> impl Future<Output = Result<Vec<EntityRef>, HubError>> + Send;

    /// Whether the hub knows an entity under this reference.
    fn exists(&self, entity: &EntityRef) -> impl Future<Output = Result<bool, HubError>> + Send;

    /// Current raw state of one entity.
    fn state_of(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<StateValue, HubError>> + Send;

    /// Human-readable name of one entity.
    fn friendly_name(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<String, HubError>> + Send;

    /// Whether the entity is a light group exposing named hue scenes.
    fn is_hue_group(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<bool, HubError>> + Send;

    /// Turn an entity on, with a brightness percent for dimmable lights.
    fn turn_on(
        &self,
        entity: &EntityRef,
        brightness: Option<u8>,
    ) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Turn an entity off.
    fn turn_off(&self, entity: &EntityRef) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Activate a scene entity.
    fn activate_scene(
        &self,
        scene: &EntityRef,
    ) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Recall a named hue scene on a light group.
    fn activate_hue_scene(
        &self,
        group_name: &str,
        scene_name: &str,
    ) -> impl Future<Output = Result<(), HubError>> + Send;

    /// Subscribe to the hub's event stream.
    fn subscribe(&self) -> broadcast::Receiver<HubEvent>;
}

impl<T: Hub + Sync> Hub for &T {
    fn entity_ids(&self) -> impl Future<Output = Result<Vec<EntityRef>, HubError>> + Send {
        (**self).entity_ids()
    }

    fn exists(&self, entity: &EntityRef) -> impl Future<Output = Result<bool, HubError>> + Send {
        (**self).exists(entity)
    }

    fn state_of(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<StateValue, HubError>> + Send {
        (**self).state_of(entity)
    }

    fn friendly_name(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<String, HubError>> + Send {
        (**self).friendly_name(entity)
    }

    fn is_hue_group(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<bool, HubError>> + Send {
        (**self).is_hue_group(entity)
    }

    fn turn_on(
        &self,
        entity: &EntityRef,
        brightness: Option<u8>,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).turn_on(entity, brightness)
    }

    fn turn_off(&self, entity: &EntityRef) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).turn_off(entity)
    }

    fn activate_scene(
        &self,
        scene: &EntityRef,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).activate_scene(scene)
    }

    fn activate_hue_scene(
        &self,
        group_name: &str,
        scene_name: &str,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).activate_hue_scene(group_name, scene_name)
    }

    fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        (**self).subscribe()
    }
}

impl<T: Hub + Send + Sync> Hub for std::sync::Arc<T> {
    fn entity_ids(&self) -> impl Future<Output = Result<Vec<EntityRef>, HubError>> + Send {
        (**self).entity_ids()
    }

    fn exists(&self, entity: &EntityRef) -> impl Future<Output = Result<bool, HubError>> + Send {
        (**self).exists(entity)
    }

    fn state_of(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<StateValue, HubError>> + Send {
        (**self).state_of(entity)
    }

    fn friendly_name(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<String, HubError>> + Send {
        (**self).friendly_name(entity)
    }

    fn is_hue_group(
        &self,
        entity: &EntityRef,
    ) -> impl Future<Output = Result<bool, HubError>> + Send {
        (**self).is_hue_group(entity)
    }

    fn turn_on(
        &self,
        entity: &EntityRef,
        brightness: Option<u8>,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).turn_on(entity, brightness)
    }

    fn turn_off(&self, entity: &EntityRef) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).turn_off(entity)
    }

    fn activate_scene(
        &self,
        scene: &EntityRef,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).activate_scene(scene)
    }

    fn activate_hue_scene(
        &self,
        group_name: &str,
        scene_name: &str,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).activate_hue_scene(group_name, scene_name)
    }

    fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        (**self).subscribe()
    }
}
