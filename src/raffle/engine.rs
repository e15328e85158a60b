//! The raffle state machine.
//!
//! A draw moves through `Idle -> [Counting] -> Raffling -> Revealed`, driven
//! by user triggers and by timers handed out by a [`Scheduler`]. At most one
//! timer is live at any moment; scheduling a new one cancels the previous,
//! and [`RaffleEngine::reset_draw`] cancels whatever is pending, so nothing
//! scheduled before a reset can touch the state after it.

use super::config::{clamp_to, RaffleConfig, Timing, COUNTDOWN_RANGE, DIGIT_RANGE};
use super::countdown::{Countdown, CountdownValue, Step};
use super::history::{History, HistoryEntry};
use super::scheduler::{Scheduler, TimerHandle};
use super::winner::generate_winner;
use crate::store::{self, Store};
use tracing::{debug, info, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Counting,
    Raffling,
    Revealed,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Counting => "counting",
            Phase::Raffling => "raffling",
            Phase::Revealed => "revealed",
        }
    }
}

/// Transient state of the current draw. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawState {
    pub phase: Phase,
    pub winner: Option<String>,
    pub revealed_count: u8,
}

impl DrawState {
    /// Counting and raffling both refuse new triggers.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Counting | Phase::Raffling)
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaffleSnapshot {
    pub phase: Phase,
    pub digit_count: u8,
    pub is_raffling: bool,
    pub winner: Option<String>,
    pub revealed_count: u8,
    pub is_manual_reveal_enabled: bool,
    pub history: Vec<HistoryEntry>,
    pub countdown: Option<CountdownValue>,
    pub is_countdown_enabled: bool,
    pub countdown_duration: u8,
}

/// Side effect fired once each time a draw is fully revealed.
pub trait Celebration {
    fn celebrate(&mut self);
}

impl<F: FnMut()> Celebration for F {
    fn celebrate(&mut self) {
        self()
    }
}

type Listener = Box<dyn FnMut(&RaffleSnapshot)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawKind {
    Traditional,
    Manual,
}

/// What the live timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Countdown(DrawKind),
    RevealAll,
    RevealDigit,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    handle: TimerHandle,
    pending: Pending,
}

pub struct RaffleEngine<S: Scheduler> {
    config: RaffleConfig,
    draw: DrawState,
    history: History,
    countdown: Countdown,
    timing: Timing,
    active: Option<ActiveTimer>,
    scheduler: S,
    store: Box<dyn Store>,
    listeners: Vec<Listener>,
    celebration: Option<Box<dyn Celebration>>,
}

impl<S: Scheduler> RaffleEngine<S> {
    /// Build an engine, reading settings and history from `store` once.
    pub fn new(scheduler: S, store: Box<dyn Store>, timing: Timing, timestamp_format: &str) -> Self {
        let config = RaffleConfig::load(store.as_ref());
        let entries = store::load(store.as_ref(), store::KEY_HISTORY, Vec::new());
        let history = History::new(entries, timestamp_format);
        debug!(?config, history = history.len(), "raffle engine loaded");

        Self {
            config,
            draw: DrawState::default(),
            history,
            countdown: Countdown::new(timing.countdown_tick, timing.go_grace),
            timing,
            active: None,
            scheduler,
            store,
            listeners: Vec::new(),
            celebration: None,
        }
    }

    pub fn set_celebration(&mut self, celebration: impl Celebration + 'static) {
        self.celebration = Some(Box::new(celebration));
    }

    /// Register a listener called with a fresh snapshot after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&RaffleSnapshot) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn config(&self) -> &RaffleConfig {
        &self.config
    }

    pub fn draw(&self) -> &DrawState {
        &self.draw
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn countdown_value(&self) -> Option<CountdownValue> {
        self.countdown.value()
    }

    pub fn is_busy(&self) -> bool {
        self.draw.is_busy()
    }

    pub fn snapshot(&self) -> RaffleSnapshot {
        RaffleSnapshot {
            phase: self.draw.phase,
            digit_count: self.config.digit_count,
            is_raffling: self.draw.phase == Phase::Raffling,
            winner: self.draw.winner.clone(),
            revealed_count: self.draw.revealed_count,
            is_manual_reveal_enabled: self.config.manual_reveal,
            history: self.history.entries().to_vec(),
            countdown: self.countdown.value(),
            is_countdown_enabled: self.config.countdown_enabled,
            countdown_duration: self.config.countdown_duration,
        }
    }

    #[cfg(test)]
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    #[cfg(test)]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// The single user-facing entry point: start a draw or reveal the next
    /// digit. Ignored while a countdown or raffle is in flight.
    pub fn trigger_draw(&mut self) {
        if self.draw.is_busy() {
            debug!(phase = self.draw.phase.label(), "draw trigger ignored");
            return;
        }

        if !self.config.manual_reveal {
            self.start_fresh(DrawKind::Traditional);
        } else if self.draw.winner.is_none() || self.draw.revealed_count >= self.config.digit_count {
            self.start_fresh(DrawKind::Manual);
        } else {
            self.draw.phase = Phase::Raffling;
            self.schedule(self.timing.manual_settle, Pending::RevealDigit);
            self.notify();
        }
    }

    /// Cancel anything pending and return to an empty `Idle` draw.
    pub fn reset_draw(&mut self) {
        self.cancel_timer();
        self.countdown.cancel();
        self.draw = DrawState::default();
        debug!("draw reset");
        self.notify();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist_history();
        info!("history cleared");
        self.reset_draw();
    }

    /// Forget every stored value and start over with default settings.
    pub fn wipe_data(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear stored data");
        }
        self.config = RaffleConfig::default();
        self.history.clear();
        info!("stored data wiped");
        self.reset_draw();
    }

    /// Changing the digit count abandons the current draw.
    pub fn set_digit_count(&mut self, value: i64) {
        let digits = clamp_to(value, &DIGIT_RANGE);
        if digits == self.config.digit_count {
            return;
        }
        self.config.digit_count = digits;
        store::save(self.store.as_mut(), store::KEY_DIGIT_COUNT, &digits);
        info!(digits, "digit count changed");
        self.reset_draw();
    }

    pub fn set_manual_reveal(&mut self, enabled: bool) {
        if enabled == self.config.manual_reveal {
            return;
        }
        self.config.manual_reveal = enabled;
        store::save(self.store.as_mut(), store::KEY_MANUAL_REVEAL, &enabled);
        info!(enabled, "manual reveal toggled");
        self.notify();
    }

    pub fn set_countdown_enabled(&mut self, enabled: bool) {
        if enabled == self.config.countdown_enabled {
            return;
        }
        self.config.countdown_enabled = enabled;
        store::save(self.store.as_mut(), store::KEY_COUNTDOWN_ENABLED, &enabled);
        info!(enabled, "countdown toggled");
        self.notify();
    }

    /// Takes effect on the next countdown; one already running keeps going.
    pub fn set_countdown_duration(&mut self, value: i64) {
        let seconds = clamp_to(value, &COUNTDOWN_RANGE);
        if seconds == self.config.countdown_duration {
            return;
        }
        self.config.countdown_duration = seconds;
        store::save(self.store.as_mut(), store::KEY_COUNTDOWN_DURATION, &seconds);
        info!(seconds, "countdown duration changed");
        self.notify();
    }

    /// Label a history entry. Returns `false` when `id` is unknown.
    pub fn update_winner_name(&mut self, id: u64, name: &str) -> bool {
        if !self.history.rename(id, name) {
            return false;
        }
        self.persist_history();
        self.notify();
        true
    }

    /// Deliver an elapsed timer. Anything but the live handle is stale and
    /// dropped without touching state.
    pub fn fire(&mut self, handle: TimerHandle) {
        let pending = match self.active {
            Some(active) if active.handle == handle => active.pending,
            _ => {
                trace!(?handle, "ignoring stale timer");
                return;
            }
        };
        self.active = None;

        match pending {
            Pending::Countdown(kind) => match self.countdown.advance() {
                Step::Next(delay) => {
                    self.schedule(delay, Pending::Countdown(kind));
                    self.notify();
                }
                Step::Done => self.begin_raffling(kind),
            },
            Pending::RevealAll => {
                self.draw.winner = Some(generate_winner(self.config.digit_count));
                self.draw.revealed_count = self.config.digit_count;
                self.complete();
            }
            Pending::RevealDigit => self.reveal_next_digit(),
        }
    }

    fn start_fresh(&mut self, kind: DrawKind) {
        self.draw.winner = None;
        self.draw.revealed_count = 0;

        if self.config.countdown_enabled {
            self.draw.phase = Phase::Counting;
            let delay = self.countdown.start(self.config.countdown_duration);
            self.schedule(delay, Pending::Countdown(kind));
            debug!(seconds = self.config.countdown_duration, "countdown started");
            self.notify();
        } else {
            self.begin_raffling(kind);
        }
    }

    fn begin_raffling(&mut self, kind: DrawKind) {
        self.draw.phase = Phase::Raffling;
        match kind {
            DrawKind::Traditional => self.schedule(self.timing.settle, Pending::RevealAll),
            DrawKind::Manual => {
                // The number is fixed up front; digits only become visible
                // as revealed_count grows.
                self.draw.winner = Some(generate_winner(self.config.digit_count));
                self.schedule(self.timing.manual_settle, Pending::RevealDigit);
            }
        }
        debug!(?kind, "raffling");
        self.notify();
    }

    fn reveal_next_digit(&mut self) {
        if self.draw.winner.is_none() {
            self.draw.phase = Phase::Idle;
            self.notify();
            return;
        }
        self.draw.revealed_count = (self.draw.revealed_count + 1).min(self.config.digit_count);
        if self.draw.revealed_count == self.config.digit_count {
            self.complete();
        } else {
            self.draw.phase = Phase::Idle;
            debug!(revealed = self.draw.revealed_count, "digit revealed");
            self.notify();
        }
    }

    fn complete(&mut self) {
        self.draw.phase = Phase::Revealed;
        if let Some(number) = self.draw.winner.as_deref() {
            let entry = self.history.record(number);
            info!(id = entry.id, number = %entry.number, "draw complete");
            self.persist_history();
        }
        self.notify();
        if let Some(celebration) = self.celebration.as_mut() {
            celebration.celebrate();
        }
    }

    fn schedule(&mut self, delay: std::time::Duration, pending: Pending) {
        self.cancel_timer();
        let handle = self.scheduler.schedule(delay);
        self.active = Some(ActiveTimer { handle, pending });
    }

    fn cancel_timer(&mut self) {
        if let Some(active) = self.active.take() {
            self.scheduler.cancel(active.handle);
        }
    }

    fn persist_history(&mut self) {
        store::save(self.store.as_mut(), store::KEY_HISTORY, self.history.entries());
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raffle::scheduler::ManualScheduler;
    use crate::store::{FailingStore, MemoryStore};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    type TestEngine = RaffleEngine<ManualScheduler>;

    fn engine_with(store: MemoryStore) -> (TestEngine, Rc<Cell<usize>>) {
        let mut engine = RaffleEngine::new(
            ManualScheduler::new(),
            Box::new(store),
            Timing::default(),
            "%H:%M:%S",
        );
        let celebrations = Rc::new(Cell::new(0));
        let counter = celebrations.clone();
        engine.set_celebration(move || counter.set(counter.get() + 1));
        (engine, celebrations)
    }

    fn engine() -> (TestEngine, Rc<Cell<usize>>) {
        engine_with(MemoryStore::default())
    }

    /// Move virtual time forward, firing every timer that falls due,
    /// including ones scheduled by earlier firings.
    fn advance(engine: &mut TestEngine, ms: u64) {
        let until = engine.scheduler_mut().now() + Duration::from_millis(ms);
        loop {
            let due = engine.scheduler_mut().pop_due(until);
            let Some(handle) = due else { break };
            engine.fire(handle);
        }
        engine.scheduler_mut().set_now(until);
    }

    fn record_snapshots(engine: &mut TestEngine) -> Rc<RefCell<Vec<RaffleSnapshot>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        engine.subscribe(move |snap| sink.borrow_mut().push(snap.clone()));
        seen
    }

    fn countdown_values(seen: &[RaffleSnapshot]) -> Vec<Option<CountdownValue>> {
        let mut values: Vec<Option<CountdownValue>> = Vec::new();
        for snap in seen {
            if values.last() != Some(&snap.countdown) {
                values.push(snap.countdown);
            }
        }
        values
    }

    fn assert_reset(engine: &TestEngine) {
        assert_eq!(engine.draw().phase, Phase::Idle);
        assert_eq!(engine.draw().winner, None);
        assert_eq!(engine.draw().revealed_count, 0);
        assert_eq!(engine.countdown_value(), None);
    }

    #[test]
    fn test_traditional_draw_without_countdown() {
        let (mut e, celebrations) = engine();
        e.set_countdown_enabled(false);

        e.trigger_draw();
        assert_eq!(e.draw().phase, Phase::Raffling);
        assert!(e.snapshot().is_raffling);
        assert_eq!(e.draw().winner, None);

        advance(&mut e, 799);
        assert_eq!(e.draw().phase, Phase::Raffling);
        assert!(e.history().is_empty());

        advance(&mut e, 1);
        let winner = e.draw().winner.clone().unwrap();
        assert_eq!(e.draw().phase, Phase::Revealed);
        assert_eq!(e.draw().revealed_count, 3);
        assert_eq!(winner.len(), 3);
        assert!(winner.chars().all(|c| c.is_ascii_digit()));

        assert_eq!(e.history().len(), 1);
        let entry = e.history().latest().unwrap();
        assert_eq!(entry.number, winner);
        assert!(!entry.timestamp.is_empty());
        assert!(entry.winner_name.is_empty());
        assert_eq!(celebrations.get(), 1);
    }

    #[test]
    fn test_trigger_while_raffling_is_noop() {
        let (mut e, _) = engine();
        e.set_countdown_enabled(false);
        e.trigger_draw();

        let before = e.snapshot();
        let handle = e.scheduler_mut().last_issued();
        e.trigger_draw();
        assert_eq!(e.snapshot(), before);
        assert_eq!(e.scheduler_mut().last_issued(), handle);
        assert_eq!(e.scheduler_mut().pending(), 1);

        advance(&mut e, 800);
        assert_eq!(e.history().len(), 1);
    }

    #[test]
    fn test_trigger_while_counting_is_noop() {
        let (mut e, _) = engine();
        e.trigger_draw();
        advance(&mut e, 1200);
        assert_eq!(e.draw().phase, Phase::Counting);

        let before = e.snapshot();
        e.trigger_draw();
        assert_eq!(e.snapshot(), before);
        assert_eq!(e.scheduler_mut().pending(), 1);
    }

    #[test]
    fn test_countdown_sequence_gates_draw() {
        let (mut e, celebrations) = engine();
        let seen = record_snapshots(&mut e);

        e.trigger_draw();
        assert_eq!(e.draw().phase, Phase::Counting);
        assert_eq!(e.countdown_value(), Some(CountdownValue::Seconds(3)));

        advance(&mut e, 3000);
        assert_eq!(e.countdown_value(), Some(CountdownValue::Go));
        assert_eq!(e.draw().phase, Phase::Counting);

        advance(&mut e, 799);
        assert_eq!(e.draw().phase, Phase::Counting);
        advance(&mut e, 1);
        assert_eq!(e.draw().phase, Phase::Raffling);
        assert_eq!(e.countdown_value(), None);

        advance(&mut e, 800);
        assert_eq!(e.draw().phase, Phase::Revealed);
        assert_eq!(celebrations.get(), 1);

        assert_eq!(
            countdown_values(&seen.borrow()),
            vec![
                Some(CountdownValue::Seconds(3)),
                Some(CountdownValue::Seconds(2)),
                Some(CountdownValue::Seconds(1)),
                Some(CountdownValue::Go),
                None,
            ]
        );
    }

    #[test]
    fn test_disabled_countdown_emits_nothing() {
        let (mut e, _) = engine();
        e.set_countdown_enabled(false);
        let seen = record_snapshots(&mut e);

        e.trigger_draw();
        advance(&mut e, 800);

        let seen = seen.borrow();
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|s| s.countdown.is_none()));
        assert!(seen.iter().all(|s| s.phase != Phase::Counting));
    }

    #[test]
    fn test_manual_reveal_one_digit_per_trigger() {
        let (mut e, celebrations) = engine();
        e.set_countdown_enabled(false);
        e.set_manual_reveal(true);

        e.trigger_draw();
        assert_eq!(e.draw().phase, Phase::Raffling);
        assert!(e.draw().winner.is_some());
        assert_eq!(e.draw().revealed_count, 0);

        advance(&mut e, 500);
        assert_eq!(e.draw().revealed_count, 1);
        assert_eq!(e.draw().phase, Phase::Idle);
        let winner = e.draw().winner.clone().unwrap();
        assert!(e.history().is_empty());

        e.trigger_draw();
        assert_eq!(e.draw().phase, Phase::Raffling);
        advance(&mut e, 500);
        assert_eq!(e.draw().revealed_count, 2);
        assert_eq!(e.draw().winner.as_deref(), Some(winner.as_str()));
        assert!(e.history().is_empty());
        assert_eq!(celebrations.get(), 0);

        e.trigger_draw();
        advance(&mut e, 500);
        assert_eq!(e.draw().revealed_count, 3);
        assert_eq!(e.draw().phase, Phase::Revealed);
        assert_eq!(e.history().len(), 1);
        assert_eq!(e.history().latest().unwrap().number, winner);
        assert_eq!(celebrations.get(), 1);

        // A finished draw restarts on the next trigger.
        e.trigger_draw();
        assert_eq!(e.draw().revealed_count, 0);
        advance(&mut e, 500);
        assert_eq!(e.draw().revealed_count, 1);
        assert_eq!(e.history().len(), 1);
    }

    #[test]
    fn test_manual_countdown_only_before_first_digit() {
        let (mut e, _) = engine();
        e.set_manual_reveal(true);

        e.trigger_draw();
        assert_eq!(e.draw().phase, Phase::Counting);
        advance(&mut e, 3800 + 500);
        assert_eq!(e.draw().revealed_count, 1);

        e.trigger_draw();
        assert_eq!(e.draw().phase, Phase::Raffling);
        assert_eq!(e.countdown_value(), None);
        advance(&mut e, 500);
        assert_eq!(e.draw().revealed_count, 2);
    }

    #[test]
    fn test_manual_single_digit_completes_immediately() {
        let (mut e, celebrations) = engine();
        e.set_countdown_enabled(false);
        e.set_manual_reveal(true);
        e.set_digit_count(1);

        e.trigger_draw();
        advance(&mut e, 500);
        assert_eq!(e.draw().phase, Phase::Revealed);
        assert_eq!(e.history().len(), 1);
        assert_eq!(celebrations.get(), 1);
    }

    #[test]
    fn test_reset_during_countdown_cancels_timer() {
        let (mut e, celebrations) = engine();
        e.trigger_draw();
        advance(&mut e, 1500);
        let stale = e.scheduler_mut().last_issued().unwrap();

        e.reset_draw();
        assert_reset(&e);
        assert_eq!(e.scheduler_mut().pending(), 0);

        let after = e.snapshot();
        e.fire(stale);
        advance(&mut e, 10_000);
        assert_eq!(e.snapshot(), after);
        assert!(e.history().is_empty());
        assert_eq!(celebrations.get(), 0);
    }

    #[test]
    fn test_reset_during_raffle_cancels_timer() {
        let (mut e, _) = engine();
        e.set_countdown_enabled(false);
        e.trigger_draw();
        let stale = e.scheduler_mut().last_issued().unwrap();

        e.reset_draw();
        assert_reset(&e);
        e.fire(stale);
        advance(&mut e, 5_000);
        assert_reset(&e);
        assert!(e.history().is_empty());
    }

    #[test]
    fn test_reset_after_reveal() {
        let (mut e, _) = engine();
        e.set_countdown_enabled(false);
        e.trigger_draw();
        advance(&mut e, 800);
        assert_eq!(e.draw().phase, Phase::Revealed);

        e.reset_draw();
        assert_reset(&e);
        assert_eq!(e.history().len(), 1);
    }

    #[test]
    fn test_clear_history_forces_idle() {
        let (mut e, _) = engine();
        e.set_countdown_enabled(false);
        e.trigger_draw();
        advance(&mut e, 800);

        e.set_countdown_enabled(true);
        e.trigger_draw();
        assert_eq!(e.draw().phase, Phase::Counting);

        e.clear_history();
        assert!(e.history().is_empty());
        assert_reset(&e);
        assert_eq!(e.scheduler_mut().pending(), 0);

        let stored = store::load(e.store(), store::KEY_HISTORY, vec![HistoryEntry {
            id: 1,
            number: "x".into(),
            timestamp: String::new(),
            winner_name: String::new(),
        }]);
        assert!(stored.is_empty());
    }

    #[test]
    fn test_update_winner_name_persists() {
        let (mut e, _) = engine();
        e.set_countdown_enabled(false);
        for _ in 0..2 {
            e.trigger_draw();
            advance(&mut e, 800);
        }
        let before = e.history().entries().to_vec();
        let older = before[1].id;

        assert!(e.update_winner_name(older, "Lucía"));
        assert!(!e.update_winner_name(older + 1_000_000, "ghost"));

        let after = e.history().entries();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1].winner_name, "Lucía");
        assert_eq!(after[1].number, before[1].number);

        let stored: Vec<HistoryEntry> = store::load(e.store(), store::KEY_HISTORY, Vec::new());
        assert_eq!(stored, after);
    }

    #[test]
    fn test_digit_count_clamps_and_resets() {
        let (mut e, _) = engine();
        e.set_countdown_enabled(false);
        e.set_manual_reveal(true);
        e.trigger_draw();
        advance(&mut e, 500);
        assert_eq!(e.draw().revealed_count, 1);

        e.set_digit_count(9);
        assert_eq!(e.config().digit_count, 5);
        assert_reset(&e);
        assert_eq!(store::load(e.store(), store::KEY_DIGIT_COUNT, 0u8), 5);

        e.set_digit_count(-3);
        assert_eq!(e.config().digit_count, 1);
    }

    #[test]
    fn test_digit_count_change_mid_raffle_drops_timer() {
        let (mut e, _) = engine();
        e.set_countdown_enabled(false);
        e.trigger_draw();
        e.set_digit_count(4);
        assert_reset(&e);
        advance(&mut e, 2_000);
        assert!(e.history().is_empty());
    }

    #[test]
    fn test_countdown_duration_clamps() {
        let (mut e, _) = engine();
        e.set_countdown_duration(1);
        assert_eq!(e.config().countdown_duration, 3);
        e.set_countdown_duration(50);
        assert_eq!(e.config().countdown_duration, 10);
        assert_eq!(store::load(e.store(), store::KEY_COUNTDOWN_DURATION, 0u8), 10);

        e.trigger_draw();
        assert_eq!(e.countdown_value(), Some(CountdownValue::Seconds(10)));
    }

    #[test]
    fn test_settings_loaded_from_store() {
        let mut store = MemoryStore::default();
        store::save(&mut store, store::KEY_DIGIT_COUNT, &5u8);
        store::save(&mut store, store::KEY_MANUAL_REVEAL, &true);
        store::save(&mut store, store::KEY_COUNTDOWN_ENABLED, &false);
        store::save(&mut store, store::KEY_COUNTDOWN_DURATION, &7u8);
        let entries = vec![HistoryEntry {
            id: 42,
            number: "12345".into(),
            timestamp: "10:00:00".into(),
            winner_name: "Pedro".into(),
        }];
        store::save(&mut store, store::KEY_HISTORY, &entries);

        let (e, _) = engine_with(store);
        let snap = e.snapshot();
        assert_eq!(snap.digit_count, 5);
        assert!(snap.is_manual_reveal_enabled);
        assert!(!snap.is_countdown_enabled);
        assert_eq!(snap.countdown_duration, 7);
        assert_eq!(snap.history, entries);
        assert_eq!(snap.phase, Phase::Idle);
    }

    #[test]
    fn test_rapid_draws_get_unique_ids() {
        let (mut e, _) = engine();
        e.set_countdown_enabled(false);
        for _ in 0..5 {
            e.trigger_draw();
            advance(&mut e, 800);
        }
        let ids: Vec<u64> = e.history().entries().iter().map(|h| h.id).collect();
        assert_eq!(ids.len(), 5);
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_wipe_data_restores_defaults() {
        let (mut e, _) = engine();
        e.set_countdown_enabled(false);
        e.set_digit_count(5);
        e.trigger_draw();
        advance(&mut e, 800);

        e.wipe_data();
        assert_eq!(*e.config(), RaffleConfig::default());
        assert!(e.history().is_empty());
        assert_reset(&e);
        assert!(e.store().get(store::KEY_DIGIT_COUNT).is_none());
        assert!(e.store().get(store::KEY_HISTORY).is_none());
    }

    #[test]
    fn test_revealed_phase_matches_invariant() {
        let (mut e, _) = engine();
        e.set_manual_reveal(true);
        e.set_countdown_enabled(false);
        let seen = record_snapshots(&mut e);
        for _ in 0..4 {
            e.trigger_draw();
            advance(&mut e, 500);
        }
        for snap in seen.borrow().iter() {
            assert!(snap.revealed_count <= snap.digit_count);
            let complete = snap.winner.is_some() && snap.revealed_count == snap.digit_count;
            assert_eq!(snap.phase == Phase::Revealed, complete);
        }
    }

    #[test]
    fn test_failing_store_keeps_state_in_memory() {
        let mut e = RaffleEngine::new(
            ManualScheduler::new(),
            Box::new(FailingStore::default()),
            Timing::default(),
            "%H:%M:%S",
        );
        let celebrations = Rc::new(Cell::new(0));
        let counter = celebrations.clone();
        e.set_celebration(move || counter.set(counter.get() + 1));

        e.set_countdown_enabled(false);
        e.set_digit_count(4);
        assert_eq!(e.config().digit_count, 4);
        assert!(!e.config().countdown_enabled);

        e.trigger_draw();
        advance(&mut e, 800);
        assert_eq!(e.draw().phase, Phase::Revealed);
        assert_eq!(e.history().len(), 1);
        assert_eq!(celebrations.get(), 1);

        let id = e.history().entries()[0].id;
        assert!(e.update_winner_name(id, "Ana"));
        assert_eq!(e.history().entries()[0].winner_name, "Ana");

        e.wipe_data();
        assert_eq!(*e.config(), RaffleConfig::default());
        assert!(e.history().is_empty());
        assert_reset(&e);
    }
}
