//! Pre-draw countdown sub-machine.
//!
//! Emits `D, D-1, .., 1` on the tick cadence, then a GO marker for a short
//! grace period, then nothing. The owner schedules the delay returned by
//! each step and runs its continuation once [`Step::Done`] comes back.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownValue {
    Seconds(u8),
    Go,
}

impl fmt::Display for CountdownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownValue::Seconds(n) => write!(f, "{}", n),
            CountdownValue::Go => f.write_str("GO!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A new value is showing; call [`Countdown::advance`] again after the delay.
    Next(Duration),
    /// The countdown is over and the value is cleared.
    Done,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    value: Option<CountdownValue>,
    tick: Duration,
    go_grace: Duration,
}

impl Countdown {
    pub fn new(tick: Duration, go_grace: Duration) -> Self {
        Self {
            value: None,
            tick,
            go_grace,
        }
    }

    pub fn value(&self) -> Option<CountdownValue> {
        self.value
    }

    pub fn is_active(&self) -> bool {
        self.value.is_some()
    }

    /// Start from `seconds`, replacing any countdown already showing.
    pub fn start(&mut self, seconds: u8) -> Duration {
        self.value = Some(CountdownValue::Seconds(seconds.max(1)));
        self.tick
    }

    pub fn advance(&mut self) -> Step {
        match self.value {
            Some(CountdownValue::Seconds(n)) if n > 1 => {
                self.value = Some(CountdownValue::Seconds(n - 1));
                Step::Next(self.tick)
            }
            Some(CountdownValue::Seconds(_)) => {
                self.value = Some(CountdownValue::Go);
                Step::Next(self.go_grace)
            }
            Some(CountdownValue::Go) | None => {
                self.value = None;
                Step::Done
            }
        }
    }

    pub fn cancel(&mut self) {
        self.value = None;
    }
}
