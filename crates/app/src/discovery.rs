//! Convention-based entity discovery.
//!
//! Rooms that configure no explicit entities get them discovered: an entity
//! belongs to a room when its id contains the keyword for its role and its
//! friendly name contains the room name. Matching is case-insensitive and
//! folds `ü` to `u`, so `Büro` matches a sensor named "Motion Sensor Buro".

use motionlux_domain::entity::EntityRef;
use motionlux_domain::error::HubError;

use crate::ports::Hub;

/// Entity id keyword selecting light entities.
pub const KEYWORD_LIGHTS: &str = "light.";
/// Entity id keyword selecting motion sensors.
pub const KEYWORD_MOTION: &str = "binary_sensor.motion_sensor_";
/// Entity id keyword selecting humidity sensors.
pub const KEYWORD_HUMIDITY: &str = "sensor.humidity_";
/// Entity id keyword selecting illuminance sensors.
pub const KEYWORD_ILLUMINANCE: &str = "sensor.illumination_";

/// A hub entity together with its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedEntity {
    pub entity: EntityRef,
    pub friendly_name: String,
}

/// Fetch every entity the hub knows, with display names.
///
/// Entities whose name cannot be read keep an empty one and so never match
/// a room.
///
/// # Errors
///
/// Fails when the hub cannot list its entities.
pub async fn inventory<H: Hub>(hub: &H) -> Result<Vec<NamedEntity>, HubError> {
    let mut entries = Vec::new();
    for entity in hub.entity_ids().await? {
        let friendly_name = hub.friendly_name(&entity).await.unwrap_or_default();
        entries.push(NamedEntity {
            entity,
            friendly_name,
        });
    }
    Ok(entries)
}

/// All inventory entities playing `keyword`'s role in `room`.
#[must_use]
pub fn find_for_room(inventory: &[NamedEntity], room: &str, keyword: &str) -> Vec<EntityRef> {
    let room = normalize(room);
    inventory
        .iter()
        .filter(|candidate| candidate.entity.as_str().contains(keyword))
        .filter(|candidate| normalize(&candidate.friendly_name).contains(&room))
        .map(|candidate| candidate.entity.clone())
        .collect()
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace('ü', "u")
}
