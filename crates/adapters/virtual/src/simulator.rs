//! Periodic motion simulation for demo setups.

use std::sync::Arc;
use std::time::Duration;

use motionlux_domain::entity::EntityRef;
use tokio::task::JoinHandle;

use crate::VirtualHub;

/// Trip `sensor` every `interval` with a discrete motion pulse.
///
/// The task runs until the hub stops knowing the sensor. The returned handle
/// can be aborted to stop the simulation earlier.
pub fn spawn_motion_simulator(
    hub: Arc<VirtualHub>,
    sensor: EntityRef,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            if hub.pulse_motion(&sensor).is_err() {
                tracing::debug!(sensor = %sensor, "sensor gone, stopping motion simulation");
                break;
            }
            tracing::debug!(sensor = %sensor, "simulated motion");
        }
    })
}
