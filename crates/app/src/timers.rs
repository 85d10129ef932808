//! Tokio-backed timer service.
//!
//! One-shots are spawned tasks that sleep and push their event into the
//! room's channel; the returned handle aborts the task. Daily triggers
//! re-arm themselves after each firing, offset by up to the caller's jitter
//! in either direction so rooms do not all switch in the same instant.

use std::time::Duration;

use chrono::NaiveTime;
use motionlux_domain::event::RoomEvent;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::ports::TimerService;

/// Delivers scheduled [`RoomEvent`]s over the room's channel.
///
/// Events whose receiver has shut down are dropped.
pub struct TokioTimerService {
    tx: mpsc::UnboundedSender<RoomEvent>,
}

impl TokioTimerService {
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<RoomEvent>) -> Self {
        Self { tx }
    }

    /// Create the service together with the receiving half of its channel.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RoomEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl TimerService for TokioTimerService {
    type Handle = AbortHandle;

    fn schedule_once(&self, delay: Duration, event: RoomEvent) -> AbortHandle {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        });
        task.abort_handle()
    }

    fn cancel(&self, handle: AbortHandle) {
        handle.abort();
    }

    fn schedule_daily(&self, at: NaiveTime, jitter: Duration, event: RoomEvent) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut target = next_occurrence(at);
            loop {
                tokio::time::sleep(jittered(until(target), jitter)).await;
                if tx.send(event).is_err() {
                    break;
                }
                target += chrono::Duration::days(1);
            }
        });
    }
}

fn next_occurrence(at: NaiveTime) -> chrono::NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    let today = now.date().and_time(at);
    if today > now {
        today
    } else {
        today + chrono::Duration::days(1)
    }
}

fn until(target: chrono::NaiveDateTime) -> Duration {
    (target - chrono::Local::now().naive_local())
        .to_std()
        .unwrap_or(Duration::ZERO)
}

fn jittered(base: Duration, jitter: Duration) -> Duration {
    let offset = rand::rng().random_range(0..=2 * jitter.as_secs());
    (base + Duration::from_secs(offset)).saturating_sub(jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn should_deliver_the_event_after_the_delay() {
        let (timers, mut rx) = TokioTimerService::channel();

        timers.schedule_once(Duration::from_secs(150), RoomEvent::DelayElapsed);

        assert_eq!(rx.recv().await, Some(RoomEvent::DelayElapsed));
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_deliver_cancelled_timers() {
        let (timers, mut rx) = TokioTimerService::channel();

        let handle = timers.schedule_once(Duration::from_secs(150), RoomEvent::DelayElapsed);
        timers.cancel(handle);

        let outcome = tokio::time::timeout(Duration::from_secs(300), rx.recv()).await;
        assert!(outcome.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn should_rearm_daily_triggers_after_firing() {
        let (timers, mut rx) = TokioTimerService::channel();
        let at = chrono::Local::now().time();

        timers.schedule_daily(
            at,
            Duration::from_secs(5),
            RoomEvent::DaytimeStarted { index: 2 },
        );

        assert_eq!(rx.recv().await, Some(RoomEvent::DaytimeStarted { index: 2 }));
        assert_eq!(rx.recv().await, Some(RoomEvent::DaytimeStarted { index: 2 }));
    }

    #[test]
    fn should_clamp_the_jitter_around_the_base() {
        for _ in 0..100 {
            let jittered = super::jittered(Duration::from_secs(60), Duration::from_secs(5));
            assert!(jittered >= Duration::from_secs(55));
            assert!(jittered <= Duration::from_secs(65));
        }
    }

    #[test]
    fn should_never_produce_a_negative_wait() {
        for _ in 0..100 {
            let jittered = super::jittered(Duration::ZERO, Duration::from_secs(5));
            assert!(jittered <= Duration::from_secs(5));
        }
    }

    #[test]
    fn should_keep_the_base_with_zero_jitter() {
        let base = Duration::from_secs(60);
        assert_eq!(super::jittered(base, Duration::ZERO), base);
    }
}
