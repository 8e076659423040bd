use std::time::{Duration, Instant};

/// Paces redraws to a preferred frames-per-second rate.
///
/// A rate of `0` disables pacing; the runtime then redraws continuously and
/// relies on the present mode for throttling.
///
/// When a deadline is missed the schedule re-anchors at the present time
/// instead of issuing a burst of catch-up frames.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    next: Instant,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: interval_for(fps),
            next: Instant::now(),
        }
    }

    /// Changes the target rate. The next frame becomes due immediately.
    pub fn set_target_fps(&mut self, fps: u32) {
        self.interval = interval_for(fps);
        self.next = Instant::now();
    }

    /// Frame interval, or `None` when unpaced.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Instant at which the next frame is due, or `None` when unpaced.
    pub fn deadline(&self) -> Option<Instant> {
        self.interval.map(|_| self.next)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.interval.is_none() || now >= self.next
    }

    /// Records that a frame was presented at `now` and schedules the next one.
    pub fn frame_presented(&mut self, now: Instant) {
        let Some(interval) = self.interval else {
            self.next = now;
            return;
        };

        self.next += interval;
        if self.next <= now {
            self.next = now + interval;
        }
    }
}

fn interval_for(fps: u32) -> Option<Duration> {
    (fps > 0).then(|| Duration::from_nanos(1_000_000_000 / u64::from(fps)))
}
