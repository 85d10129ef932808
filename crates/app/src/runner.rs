//! Per-room event loop.
//!
//! Owns the room's [`RoomAutomation`] and delivers hub events and timer
//! events to it one at a time, so the engine never handles two events
//! concurrently. Failures are logged per event; the loop keeps running.

use motionlux_domain::event::{HubEvent, RoomEvent};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};

use crate::ports::{Hub, TimerService};
use crate::room::RoomAutomation;

/// Drives one room's automation from its two event sources.
pub struct RoomRunner<H, T>
where
    H: Hub,
    T: TimerService,
{
    automation: RoomAutomation<H, T>,
    hub_events: broadcast::Receiver<HubEvent>,
    room_events: mpsc::UnboundedReceiver<RoomEvent>,
}

impl<H, T> RoomRunner<H, T>
where
    H: Hub,
    T: TimerService,
{
    #[must_use]
    pub fn new(
        automation: RoomAutomation<H, T>,
        hub_events: broadcast::Receiver<HubEvent>,
        room_events: mpsc::UnboundedReceiver<RoomEvent>,
    ) -> Self {
        Self {
            automation,
            hub_events,
            room_events,
        }
    }

    /// Drive the room until the hub closes its event stream.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                event = self.hub_events.recv() => match event {
                    Ok(event) => {
                        if let Err(err) = self.automation.handle_hub_event(&event).await {
                            tracing::error!(%err, room = %self.automation.room(), "hub event handling failed");
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, room = %self.automation.room(), "hub event stream lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
                event = self.room_events.recv() => match event {
                    Some(event) => {
                        if let Err(err) = self.automation.handle_room_event(event).await {
                            tracing::error!(%err, room = %self.automation.room(), "timer event handling failed");
                        }
                    }
                    None => break,
                },
            }
        }
        tracing::debug!(room = %self.automation.room(), "room loop stopped");
    }
}
