//! End-to-end tests for the assembled motion stack.
//!
//! Each test wires a virtual hub, the tokio timer service and a room runner
//! the way motionluxd does, then drives the room with simulated sensor
//! changes under paused time — no wall-clock waiting.

use std::sync::Arc;
use std::time::Duration;

use motionlux_adapter_virtual::{Command, VirtualHub};
use motionlux_app::ports::Hub;
use motionlux_app::room::RoomAutomation;
use motionlux_app::runner::RoomRunner;
use motionlux_app::timers::TokioTimerService;
use motionlux_domain::config::RoomOptions;
use motionlux_domain::daytime::DaytimeSpec;
use motionlux_domain::entity::{EntityRef, StateValue};

fn entity(raw: &str) -> EntityRef {
    EntityRef::new(raw).unwrap()
}

/// A bathroom with one light, one motion sensor and a flat all-day schedule,
/// so tests do not depend on the hour they run at.
fn bathroom_options() -> RoomOptions {
    let mut options = RoomOptions::new("bathroom");
    options.lights = vec![entity("light.bathroom")];
    options.motion = vec![entity("binary_sensor.motion_sensor_bathroom")];
    options.daytimes = vec![
        DaytimeSpec::new("00:00")
            .named("all_day")
            .with_brightness(80),
    ];
    options
}

fn bathroom_hub() -> Arc<VirtualHub> {
    let hub = Arc::new(VirtualHub::new());
    hub.add_entity(entity("light.bathroom"), "Light bathroom", StateValue::off());
    hub.add_entity(
        entity("binary_sensor.motion_sensor_bathroom"),
        "Motion Sensor bathroom",
        StateValue::off(),
    );
    hub
}

/// Resolve the room against the hub and spawn its event loop, exactly as
/// `motionluxd` does.
async fn start_room(hub: &Arc<VirtualHub>, options: RoomOptions) -> tokio::task::JoinHandle<()> {
    let hub_events = hub.subscribe();
    let (timers, room_events) = TokioTimerService::channel();
    let automation = RoomAutomation::initialize(Arc::clone(hub), timers, options)
        .await
        .expect("room should initialize");
    tokio::spawn(RoomRunner::new(automation, hub_events, room_events).run())
}

/// Poll until the recorded commands satisfy `pred`, advancing paused time a
/// little between polls.
async fn eventually(hub: &VirtualHub, description: &str, pred: impl Fn(&[Command]) -> bool) {
    for _ in 0..50 {
        if pred(&hub.commands()) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("{description} did not happen, commands: {:?}", hub.commands());
}

/// Let in-flight events drain without reaching any pending auto-off timer.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

fn turn_off_count(commands: &[Command]) -> usize {
    commands
        .iter()
        .filter(|command| matches!(command, Command::TurnOff { .. }))
        .count()
}

#[tokio::test(start_paused = true)]
async fn should_turn_lights_on_for_motion_and_off_after_the_delay() {
    let hub = bathroom_hub();
    let _room = start_room(&hub, bathroom_options()).await;

    hub.pulse_motion(&entity("binary_sensor.motion_sensor_bathroom"))
        .unwrap();
    eventually(&hub, "turn-on", |commands| {
        commands.contains(&Command::TurnOn {
            entity: entity("light.bathroom"),
            brightness: Some(80),
        })
    })
    .await;

    tokio::time::sleep(Duration::from_secs(151)).await;
    eventually(&hub, "turn-off", |commands| {
        commands.contains(&Command::TurnOff {
            entity: entity("light.bathroom"),
        })
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn should_hold_lights_while_a_level_sensor_reports_motion() {
    let hub = bathroom_hub();
    let mut options = bathroom_options();
    options.motion_state_on = Some("on".to_string());
    options.motion_state_off = Some("off".to_string());
    let _room = start_room(&hub, options).await;

    hub.set_state(
        &entity("binary_sensor.motion_sensor_bathroom"),
        StateValue::on(),
    )
    .unwrap();
    eventually(&hub, "turn-on", |commands| {
        matches!(commands.first(), Some(Command::TurnOn { .. }))
    })
    .await;

    // While the sensor holds its on-state there is no auto-off timer.
    tokio::time::sleep(Duration::from_secs(400)).await;
    settle().await;
    assert_eq!(turn_off_count(&hub.commands()), 0);

    hub.set_state(
        &entity("binary_sensor.motion_sensor_bathroom"),
        StateValue::off(),
    )
    .unwrap();
    tokio::time::sleep(Duration::from_secs(151)).await;
    eventually(&hub, "turn-off", |commands| turn_off_count(commands) == 1).await;
}

#[tokio::test(start_paused = true)]
async fn should_keep_lights_on_while_the_bathroom_is_humid() {
    let hub = bathroom_hub();
    hub.set_state(&entity("light.bathroom"), StateValue::on())
        .unwrap();
    hub.add_entity(
        entity("sensor.humidity_bathroom"),
        "Humidity bathroom",
        StateValue::new("80"),
    );
    let mut options = bathroom_options();
    options.humidity = vec![entity("sensor.humidity_bathroom")];
    options.humidity_threshold = Some(70.0);
    let _room = start_room(&hub, options).await;

    // The startup-armed auto-off elapses but the humidity gate re-arms it.
    tokio::time::sleep(Duration::from_secs(151)).await;
    settle().await;
    assert_eq!(turn_off_count(&hub.commands()), 0);

    hub.set_state(&entity("sensor.humidity_bathroom"), StateValue::new("40"))
        .unwrap();
    tokio::time::sleep(Duration::from_secs(151)).await;
    eventually(&hub, "turn-off", |commands| turn_off_count(commands) == 1).await;
}

#[tokio::test(start_paused = true)]
async fn should_suppress_all_actions_while_the_disable_switch_is_off() {
    let hub = bathroom_hub();
    hub.set_state(&entity("light.bathroom"), StateValue::on())
        .unwrap();
    hub.add_entity(
        entity("input_boolean.automoli_bathroom"),
        "AutoMoLi bathroom",
        StateValue::off(),
    );
    let mut options = bathroom_options();
    options.disable_switch_entities = vec![entity("input_boolean.automoli_bathroom")];
    let _room = start_room(&hub, options).await;

    hub.pulse_motion(&entity("binary_sensor.motion_sensor_bathroom"))
        .unwrap();
    tokio::time::sleep(Duration::from_secs(151)).await;
    settle().await;

    assert!(hub.commands().is_empty());
}
