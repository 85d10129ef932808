//! Timer port — deferred delivery of room events.
//!
//! The engine never sleeps itself. It asks a timer service to deliver a
//! [`RoomEvent`] later, and keeps a handle to call the whole thing off when
//! new motion arrives first.

use std::time::Duration;

use chrono::NaiveTime;
use motionlux_domain::event::RoomEvent;

/// Schedules room events for later delivery.
pub trait TimerService {
    /// Token for a pending one-shot timer.
    type Handle: Send;

    /// Deliver `event` once, `delay` from now.
    fn schedule_once(&self, delay: Duration, event: RoomEvent) -> Self::Handle;

    /// Cancel a pending one-shot. Cancelling after the timer fired is a no-op.
    fn cancel(&self, handle: Self::Handle);

    /// Deliver `event` every day at `at` local time, offset by up to
    /// `jitter` in either direction.
    fn schedule_daily(&self, at: NaiveTime, jitter: Duration, event: RoomEvent);
}

impl<T: TimerService + Sync> TimerService for &T {
    type Handle = T::Handle;

    fn schedule_once(&self, delay: Duration, event: RoomEvent) -> Self::Handle {
        (**self).schedule_once(delay, event)
    }

    fn cancel(&self, handle: Self::Handle) {
        (**self).cancel(handle);
    }

    fn schedule_daily(&self, at: NaiveTime, jitter: Duration, event: RoomEvent) {
        (**self).schedule_daily(at, jitter, event);
    }
}

impl<T: TimerService + Send + Sync> TimerService for std::sync::Arc<T> {
    type Handle = T::Handle;

    fn schedule_once(&self, delay: Duration, event: RoomEvent) -> Self::Handle {
        (**self).schedule_once(delay, event)
    }

    fn cancel(&self, handle: Self::Handle) {
        (**self).cancel(handle);
    }

    fn schedule_daily(&self, at: NaiveTime, jitter: Duration, event: RoomEvent) {
        (**self).schedule_daily(at, jitter, event);
    }
}
