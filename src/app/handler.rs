use crate::app::action::Action;
use crate::app::commands::{self, CountdownArg, ParsedCommand};
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::raffle::{RaffleEngine, Scheduler};
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

const SETTINGS_LOCKED: &str = "Settings are locked while a draw is running";

pub fn handle_event<S: Scheduler>(
    state: &mut AppState,
    raffle: &RaffleEngine<S>,
    event: AppEvent,
) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, raffle, cevent)
        }
        AppEvent::TimerFired(handle) => vec![Action::FireTimer(handle)],
        AppEvent::RaffleChanged => {
            state.clamp_history_selection(raffle.history().len());
            state.dirty = true;
            vec![]
        }
        AppEvent::Celebrate => {
            if let Some(entry) = raffle.history().latest() {
                state.new_results.push(entry.clone());
            }
            state.start_celebration(Instant::now());
            vec![]
        }
        AppEvent::Tick => {
            handle_tick(state, raffle);
            vec![]
        }
    }
}

fn handle_tick<S: Scheduler>(state: &mut AppState, raffle: &RaffleEngine<S>) {
    state.tick_count = state.tick_count.wrapping_add(1);

    // Shuffling digits and the winner banner animate every tick.
    if raffle.draw().phase == crate::raffle::Phase::Raffling {
        state.dirty = true;
    }
    if let Some(until) = state.celebrate_until {
        if Instant::now() >= until {
            state.celebrate_until = None;
        }
        state.dirty = true;
    }
}

fn handle_terminal<S: Scheduler>(
    state: &mut AppState,
    raffle: &RaffleEngine<S>,
    event: CEvent,
) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, raffle, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key<S: Scheduler>(
    state: &mut AppState,
    raffle: &RaffleEngine<S>,
    key: KeyEvent,
) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    // Confirmation dialog captures all input when visible
    if let Some(confirm) = state.confirm {
        return handle_confirm_key(state, confirm, key);
    }

    if state.show_help {
        state.show_help = false;
        return vec![];
    }

    if key.code == KeyCode::F(1) {
        state.show_help = true;
        return vec![];
    }

    if key.code == KeyCode::Tab {
        state.cycle_focus();
        return vec![];
    }

    match state.focus {
        FocusPanel::Draw => handle_draw_key(state, raffle, key),
        FocusPanel::History => handle_history_key(state, raffle, key),
        FocusPanel::Input => handle_input_key(state, raffle, key),
    }
}

fn handle_confirm_key(state: &mut AppState, confirm: Confirm, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            state.confirm = None;
            match confirm {
                Confirm::ClearHistory => {
                    state.set_status("History cleared");
                    vec![Action::ClearHistory]
                }
                Confirm::WipeData => {
                    state.set_status("All stored data erased");
                    vec![Action::WipeData]
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.confirm = None;
            vec![]
        }
        _ => vec![],
    }
}

/// Settings changes are refused while a countdown or raffle is running.
fn guard_settings<S: Scheduler>(
    state: &mut AppState,
    raffle: &RaffleEngine<S>,
    action: Action,
) -> Vec<Action> {
    if raffle.is_busy() {
        state.set_status(SETTINGS_LOCKED);
        return vec![];
    }
    vec![action]
}

fn handle_draw_key<S: Scheduler>(
    state: &mut AppState,
    raffle: &RaffleEngine<S>,
    key: KeyEvent,
) -> Vec<Action> {
    let cfg = raffle.config();
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => vec![Action::TriggerDraw],
        KeyCode::Char('r') => vec![Action::ResetDraw],
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let next = i64::from(cfg.digit_count) + 1;
            guard_settings(state, raffle, Action::SetDigitCount(next))
        }
        KeyCode::Char('-') => {
            let next = i64::from(cfg.digit_count) - 1;
            guard_settings(state, raffle, Action::SetDigitCount(next))
        }
        KeyCode::Char('m') => {
            let next = !cfg.manual_reveal;
            guard_settings(state, raffle, Action::SetManualReveal(next))
        }
        KeyCode::Char('c') => {
            let next = !cfg.countdown_enabled;
            guard_settings(state, raffle, Action::SetCountdownEnabled(next))
        }
        KeyCode::Char(']') => {
            let next = i64::from(cfg.countdown_duration) + 1;
            guard_settings(state, raffle, Action::SetCountdownDuration(next))
        }
        KeyCode::Char('[') => {
            let next = i64::from(cfg.countdown_duration) - 1;
            guard_settings(state, raffle, Action::SetCountdownDuration(next))
        }
        KeyCode::Char('x') => {
            state.confirm = Some(Confirm::ClearHistory);
            vec![]
        }
        KeyCode::Char('X') => {
            state.confirm = Some(Confirm::WipeData);
            vec![]
        }
        KeyCode::Char('?') => {
            state.show_help = true;
            vec![]
        }
        KeyCode::Char('/') => {
            state.focus = FocusPanel::Input;
            state.input.set_text("/".to_string());
            vec![]
        }
        KeyCode::Char('q') => vec![Action::Quit],
        _ => vec![],
    }
}

fn handle_history_key<S: Scheduler>(
    state: &mut AppState,
    raffle: &RaffleEngine<S>,
    key: KeyEvent,
) -> Vec<Action> {
    let entries = raffle.history().entries();
    match key.code {
        KeyCode::Up => {
            state.history_selected = state.history_selected.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.history_selected + 1 < entries.len() {
                state.history_selected += 1;
            }
        }
        KeyCode::Home => state.history_selected = 0,
        KeyCode::End => state.history_selected = entries.len().saturating_sub(1),
        KeyCode::Enter => {
            if let Some(entry) = entries.get(state.history_selected) {
                let mut line = format!("/name {} ", entry.id);
                line.push_str(&entry.winner_name);
                state.input.set_text(line);
                state.focus = FocusPanel::Input;
            }
        }
        KeyCode::Esc => state.focus = FocusPanel::Draw,
        _ => {}
    }
    vec![]
}

fn handle_input_key<S: Scheduler>(
    state: &mut AppState,
    raffle: &RaffleEngine<S>,
    key: KeyEvent,
) -> Vec<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('u') {
            state.input.set_text(String::new());
        }
        return vec![];
    }

    match key.code {
        KeyCode::Enter => {
            let text = state.input.take_text();
            process_input(state, raffle, &text)
        }
        KeyCode::Esc => {
            state.focus = FocusPanel::Draw;
            vec![]
        }
        KeyCode::Char(c) => {
            state.input.insert_char(c);
            vec![]
        }
        KeyCode::Backspace => {
            state.input.delete_back();
            vec![]
        }
        KeyCode::Delete => {
            state.input.delete_forward();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            state.input.move_home();
            vec![]
        }
        KeyCode::End => {
            state.input.move_end();
            vec![]
        }
        KeyCode::Up => {
            state.input.history_up();
            vec![]
        }
        KeyCode::Down => {
            state.input.history_down();
            vec![]
        }
        _ => vec![],
    }
}

fn process_input<S: Scheduler>(
    state: &mut AppState,
    raffle: &RaffleEngine<S>,
    text: &str,
) -> Vec<Action> {
    let text = text.trim();
    if text.is_empty() {
        return vec![];
    }
    if !text.starts_with('/') {
        state.set_status("Commands start with /  (try /help)");
        return vec![];
    }

    let Some(cmd) = commands::parse_command(text) else {
        state.set_status(format!("Unknown or incomplete command: {}", text));
        return vec![];
    };

    match cmd {
        ParsedCommand::Draw => vec![Action::TriggerDraw],
        ParsedCommand::Reset => vec![Action::ResetDraw],
        ParsedCommand::Digits { count } => {
            guard_settings(state, raffle, Action::SetDigitCount(count))
        }
        ParsedCommand::Manual { enabled } => {
            guard_settings(state, raffle, Action::SetManualReveal(enabled))
        }
        ParsedCommand::Countdown(CountdownArg::Enabled(enabled)) => {
            guard_settings(state, raffle, Action::SetCountdownEnabled(enabled))
        }
        ParsedCommand::Countdown(CountdownArg::Seconds(seconds)) => {
            guard_settings(state, raffle, Action::SetCountdownDuration(seconds))
        }
        ParsedCommand::Name { id, name } => {
            if raffle.history().entries().iter().any(|e| e.id == id) {
                state.focus = FocusPanel::History;
                vec![Action::RenameWinner { id, name }]
            } else {
                state.set_status(format!("No history entry with id {}", id));
                vec![]
            }
        }
        ParsedCommand::Clear => {
            state.confirm = Some(Confirm::ClearHistory);
            vec![]
        }
        ParsedCommand::Wipe => {
            state.confirm = Some(Confirm::WipeData);
            vec![]
        }
        ParsedCommand::Help => {
            state.show_help = true;
            vec![]
        }
        ParsedCommand::Quit => vec![Action::Quit],
    }
}
