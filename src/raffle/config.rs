//! Persisted raffle settings.

use crate::store::{self, Store};
use std::ops::RangeInclusive;
use std::time::Duration;

pub const DIGIT_RANGE: RangeInclusive<u8> = 1..=5;
pub const COUNTDOWN_RANGE: RangeInclusive<u8> = 3..=10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaffleConfig {
    pub digit_count: u8,
    pub manual_reveal: bool,
    pub countdown_enabled: bool,
    pub countdown_duration: u8,
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            digit_count: 3,
            manual_reveal: false,
            countdown_enabled: true,
            countdown_duration: 3,
        }
    }
}

/// Clamp an arbitrary integer into `range`.
pub fn clamp_to(value: i64, range: &RangeInclusive<u8>) -> u8 {
    let clamped = value.clamp(i64::from(*range.start()), i64::from(*range.end()));
    // In range of u8 after the clamp above.
    clamped as u8
}

impl RaffleConfig {
    /// Read every setting, clamping whatever was stored.
    pub fn load(store: &dyn Store) -> Self {
        let d = Self::default();
        Self {
            digit_count: clamp_to(
                store::load(store, store::KEY_DIGIT_COUNT, i64::from(d.digit_count)),
                &DIGIT_RANGE,
            ),
            manual_reveal: store::load(store, store::KEY_MANUAL_REVEAL, d.manual_reveal),
            countdown_enabled: store::load(store, store::KEY_COUNTDOWN_ENABLED, d.countdown_enabled),
            countdown_duration: clamp_to(
                store::load(store, store::KEY_COUNTDOWN_DURATION, i64::from(d.countdown_duration)),
                &COUNTDOWN_RANGE,
            ),
        }
    }
}

/// Animation pacing for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub settle: Duration,
    pub manual_settle: Duration,
    pub countdown_tick: Duration,
    pub go_grace: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(800),
            manual_settle: Duration::from_millis(500),
            countdown_tick: Duration::from_secs(1),
            go_grace: Duration::from_millis(800),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_clamp_to() {
        assert_eq!(clamp_to(0, &DIGIT_RANGE), 1);
        assert_eq!(clamp_to(-40, &DIGIT_RANGE), 1);
        assert_eq!(clamp_to(4, &DIGIT_RANGE), 4);
        assert_eq!(clamp_to(1_000, &DIGIT_RANGE), 5);
        assert_eq!(clamp_to(2, &COUNTDOWN_RANGE), 3);
        assert_eq!(clamp_to(11, &COUNTDOWN_RANGE), 10);
    }

    #[test]
    fn test_load_defaults_from_empty_store() {
        let store = MemoryStore::default();
        assert_eq!(RaffleConfig::load(&store), RaffleConfig::default());
    }

    #[test]
    fn test_load_clamps_stored_values() {
        let mut store = MemoryStore::default();
        store::save(&mut store, store::KEY_DIGIT_COUNT, &9i64);
        store::save(&mut store, store::KEY_COUNTDOWN_DURATION, &1i64);
        store::save(&mut store, store::KEY_COUNTDOWN_ENABLED, &false);

        let cfg = RaffleConfig::load(&store);
        assert_eq!(cfg.digit_count, 5);
        assert_eq!(cfg.countdown_duration, 3);
        assert!(!cfg.countdown_enabled);
        assert!(!cfg.manual_reveal);
    }
}
