use web_time::{Duration, Instant};

/// Handle to a scheduled tick of a [`FrameTimer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// One-shot timer that is polled once per frame.
///
/// At most one tick is outstanding at a time. Scheduling a new tick replaces
/// the old one, whose handle will never fire.
#[derive(Debug, Default, Clone)]
pub struct FrameTimer {
    next_id: u64,
    pending: Option<(TimerHandle, Instant)>,
}
impl FrameTimer {
    /// Constructs a timer with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a tick `delay` after `now`, cancelling any outstanding tick.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some((handle, now + delay));
        handle
    }

    /// Cancels the outstanding tick. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Returns whether a tick is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the handle of the outstanding tick if it is due, and clears it.
    pub fn poll(&mut self, now: Instant) -> Option<TimerHandle> {
        let (handle, deadline) = self.pending?;
        (now >= deadline).then(|| {
            self.pending = None;
            handle
        })
    }

    /// Returns the time remaining until the outstanding tick is due, or `None`
    /// if nothing is scheduled.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let (_, deadline) = self.pending?;
        Some(deadline.saturating_duration_since(now))
    }
}
