use crate::raffle::TimerHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    TriggerDraw,
    ResetDraw,
    ClearHistory,
    WipeData,
    SetDigitCount(i64),
    SetManualReveal(bool),
    SetCountdownEnabled(bool),
    SetCountdownDuration(i64),
    RenameWinner { id: u64, name: String },
    FireTimer(TimerHandle),
    Quit,
}
