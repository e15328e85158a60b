use crate::raffle::TimerHandle;
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// A raffle engine timer elapsed
    TimerFired(TimerHandle),

    /// The raffle engine published a new snapshot
    RaffleChanged,

    /// A draw was fully revealed
    Celebrate,

    /// Tick for UI refresh
    Tick,
}
