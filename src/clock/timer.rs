use std::future;
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// A periodic task that can be cancelled and re-armed
///
/// Cancelling drops the underlying interval, so a cancelled task can never
/// fire late. Cancelling twice is harmless.
#[derive(Debug, Default)]
pub struct TaskTimer {
    interval: Option<Interval>,
}

impl TaskTimer {
    pub fn new() -> Self {
        Self { interval: None }
    }

    /// (Re)start the task; the first firing is one full period from now
    pub fn arm(&mut self, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn cancel(&mut self) {
        self.interval = None;
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }

    /// Wait for the next firing, forever if the task is not armed
    pub async fn tick(&mut self) -> Instant {
        match self.interval.as_mut() {
            Some(interval) => interval.tick().await,
            None => future::pending().await,
        }
    }
}

/// Tick period for a speed in ticks per second
pub fn tick_period(speed: f64) -> Duration {
    Duration::from_secs_f64(1.0 / speed)
}
