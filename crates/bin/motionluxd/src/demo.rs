//! Demo seeding — registers each room's entities on the virtual hub.
//!
//! Gives a freshly started daemon something to automate: every entity the
//! rooms reference is registered with a neutral initial state, and
//! event-style motion sensors are tripped periodically by the adapter's
//! simulator.

use std::sync::Arc;
use std::time::Duration;

use motionlux_adapter_virtual::VirtualHub;
use motionlux_domain::config::RoomOptions;
use motionlux_domain::entity::{EntityRef, StateValue};
use motionlux_domain::error::InvalidEntityRef;

/// Register every entity the rooms reference.
///
/// Rooms without explicit lights or motion sensors get the conventional
/// `light.{room}` and `binary_sensor.motion_sensor_{room}` entities, named
/// so that discovery finds them again.
///
/// # Errors
///
/// Fails when a room name does not form a valid entity reference.
pub fn seed(hub: &VirtualHub, rooms: &[RoomOptions]) -> Result<(), InvalidEntityRef> {
    for options in rooms {
        let room = &options.room;
        for light in defaulted(&options.lights, || format!("light.{room}"))? {
            hub.add_entity(light, format!("Light {room}"), StateValue::off());
        }
        let clear = options
            .motion_state_off
            .clone()
            .unwrap_or_else(|| "off".to_string());
        for sensor in motion_sensors(options)? {
            hub.add_entity(
                sensor,
                format!("Motion Sensor {room}"),
                StateValue::new(&clear),
            );
        }
        for sensor in &options.humidity {
            hub.add_entity(
                sensor.clone(),
                format!("Humidity {room}"),
                StateValue::new("45"),
            );
        }
        for sensor in &options.illuminance {
            hub.add_entity(
                sensor.clone(),
                format!("Illumination {room}"),
                StateValue::new("5"),
            );
        }
        for switch in options.disable_switches() {
            hub.add_entity(switch, format!("Disable Switch {room}"), StateValue::on());
        }
    }
    Ok(())
}

/// Start a motion simulator for every event-style sensor of the rooms.
///
/// Rooms with level-sensor state strings are skipped; they would ignore the
/// simulated pulses.
///
/// # Errors
///
/// Fails when a room name does not form a valid entity reference.
pub fn spawn_simulators(
    hub: &Arc<VirtualHub>,
    rooms: &[RoomOptions],
    interval: Duration,
) -> Result<(), InvalidEntityRef> {
    for options in rooms {
        if options.motion_state_on.is_some() {
            continue;
        }
        for sensor in motion_sensors(options)? {
            motionlux_adapter_virtual::spawn_motion_simulator(Arc::clone(hub), sensor, interval);
        }
    }
    Ok(())
}

fn motion_sensors(options: &RoomOptions) -> Result<Vec<EntityRef>, InvalidEntityRef> {
    defaulted(&options.motion, || {
        format!("binary_sensor.motion_sensor_{}", options.room)
    })
}

fn defaulted(
    configured: &[EntityRef],
    fallback: impl FnOnce() -> String,
) -> Result<Vec<EntityRef>, InvalidEntityRef> {
    if configured.is_empty() {
        Ok(vec![EntityRef::new(fallback())?])
    } else {
        Ok(configured.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use motionlux_app::ports::Hub;

    use super::*;

    fn entity(raw: &str) -> EntityRef {
        EntityRef::new(raw).unwrap()
    }

    #[tokio::test]
    async fn should_seed_conventional_entities_for_a_bare_room() {
        let hub = VirtualHub::new();

        seed(&hub, &[RoomOptions::new("hall")]).unwrap();

        assert!(hub.exists(&entity("light.hall")).await.unwrap());
        assert!(
            hub.exists(&entity("binary_sensor.motion_sensor_hall"))
                .await
                .unwrap()
        );
        assert_eq!(
            hub.friendly_name(&entity("light.hall")).await.unwrap(),
            "Light hall"
        );
    }

    #[tokio::test]
    async fn should_seed_configured_entities_with_neutral_states() {
        let hub = VirtualHub::new();
        let mut options = RoomOptions::new("bathroom");
        options.lights = vec![entity("light.mirror_bathroom")];
        options.humidity = vec![entity("sensor.humidity_bathroom")];
        options.disable_switch_entities = vec![entity("input_boolean.automoli_bathroom")];

        seed(&hub, &[options]).unwrap();

        assert_eq!(
            hub.state_of(&entity("light.mirror_bathroom")).await.unwrap(),
            StateValue::off()
        );
        assert_eq!(
            hub.state_of(&entity("sensor.humidity_bathroom"))
                .await
                .unwrap()
                .number(),
            Some(45.0)
        );
        assert_eq!(
            hub.state_of(&entity("input_boolean.automoli_bathroom"))
                .await
                .unwrap(),
            StateValue::on()
        );
        assert!(!hub.exists(&entity("light.bathroom")).await.unwrap());
    }

    #[tokio::test]
    async fn should_seed_level_sensors_in_their_clear_state() {
        let hub = VirtualHub::new();
        let mut options = RoomOptions::new("office");
        options.motion_state_on = Some("occupied".to_string());
        options.motion_state_off = Some("vacant".to_string());

        seed(&hub, &[options]).unwrap();

        assert_eq!(
            hub.state_of(&entity("binary_sensor.motion_sensor_office"))
                .await
                .unwrap(),
            StateValue::new("vacant")
        );
    }

    #[tokio::test]
    async fn should_reject_a_room_name_that_breaks_entity_references() {
        let hub = VirtualHub::new();

        let result = seed(&hub, &[RoomOptions::new("")]);

        assert!(result.is_err());
    }
}
