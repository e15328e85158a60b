//! Raffle engine: draw state machine, countdown, history and winner generation.

pub mod config;
pub mod countdown;
pub mod engine;
pub mod history;
pub mod scheduler;
pub mod winner;

pub use config::{RaffleConfig, Timing};
pub use countdown::CountdownValue;
pub use engine::{Phase, RaffleEngine, RaffleSnapshot};
pub use history::HistoryEntry;
pub use scheduler::{Scheduler, TimerHandle};
