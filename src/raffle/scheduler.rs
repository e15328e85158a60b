//! Timer scheduling seam between the engine and its host.
//!
//! The engine never sleeps. It asks a [`Scheduler`] for a one-shot timer,
//! keeps the returned [`TimerHandle`], and is called back through
//! [`RaffleEngine::fire`](super::engine::RaffleEngine::fire) when the timer
//! elapses. Only the most recently issued handle is live; anything else that
//! fires is discarded by the engine.

use std::time::Duration;

/// Opaque identifier of a scheduled one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

pub trait Scheduler {
    /// Arrange for `handle` to be delivered back to the engine after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Drop a pending timer. Cancelling an unknown or already fired handle
    /// is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Virtual-time scheduler for tests.
///
/// Nothing fires on its own: the test pops due timers with
/// [`ManualScheduler::pop_due`] and feeds them to the engine, which keeps
/// the whole state machine deterministic.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    queue: Vec<(Duration, TimerHandle)>,
    issued: Vec<TimerHandle>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn last_issued(&self) -> Option<TimerHandle> {
        self.issued.last().copied()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerHandle> {
        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, (deadline, _))| *deadline <= until)
            .min_by_key(|(_, (deadline, handle))| (*deadline, *handle))
            .map(|(i, _)| i)?;
        let (deadline, handle) = self.queue.remove(idx);
        self.now = self.now.max(deadline);
        Some(handle)
    }
}

#[cfg(test)]
impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.queue.push((self.now + delay, handle));
        self.issued.push(handle);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.queue.retain(|(_, h)| *h != handle);
    }
}
