use crate::config::AppConfig;
use crate::raffle::HistoryEntry;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
    pub history: Vec<String>,
    pub history_index: Option<usize>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
        }
    }

    /// Replace the line and park the cursor at its end.
    pub fn set_text(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
        self.history_index = None;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.text.len())
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.next_boundary();
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.next_boundary();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Take the line for submission, remembering it for recall.
    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.history_index = None;
        if !text.is_empty() {
            self.history.push(text.clone());
        }
        text
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let idx = match self.history_index {
            Some(i) if i > 0 => i - 1,
            Some(_) => return,
            None => self.history.len() - 1,
        };
        self.history_index = Some(idx);
        self.text = self.history[idx].clone();
        self.cursor = self.text.len();
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => {
                self.history_index = Some(i + 1);
                self.text = self.history[i + 1].clone();
                self.cursor = self.text.len();
            }
            Some(_) => {
                self.history_index = None;
                self.text.clear();
                self.cursor = 0;
            }
            None => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Draw,
    History,
    Input,
}

/// Destructive actions that wait for a y/n answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Confirm {
    ClearHistory,
    WipeData,
}

impl Confirm {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirm::ClearHistory => "Clear the whole draw history?",
            Confirm::WipeData => "Erase ALL stored settings and history?",
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub input: InputState,
    pub focus: FocusPanel,
    pub history_selected: usize,
    pub confirm: Option<Confirm>,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub celebrate_until: Option<Instant>,
    /// Completed draws not yet written to the results log.
    pub new_results: Vec<HistoryEntry>,
    pub tick_count: u64,
    pub should_quit: bool,
    pub pending_bell: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            input: InputState::new(),
            focus: FocusPanel::Draw,
            history_selected: 0,
            confirm: None,
            show_help: false,
            status_message: None,
            celebrate_until: None,
            new_results: Vec::new(),
            tick_count: 0,
            should_quit: false,
            pending_bell: false,
            dirty: true,
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Draw => FocusPanel::History,
            FocusPanel::History => FocusPanel::Input,
            FocusPanel::Input => FocusPanel::Draw,
        };
        self.dirty = true;
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some(text.into());
        self.dirty = true;
    }

    pub fn start_celebration(&mut self, now: Instant) {
        self.celebrate_until = Some(now + Duration::from_secs(self.config.ui.celebration_secs));
        if self.config.ui.bell_on_winner {
            self.pending_bell = true;
        }
        self.dirty = true;
    }

    pub fn is_celebrating(&self, now: Instant) -> bool {
        self.celebrate_until.is_some_and(|until| now < until)
    }

    /// Keep the history cursor inside a list of `len` entries.
    pub fn clamp_history_selection(&mut self, len: usize) {
        if len == 0 {
            self.history_selected = 0;
        } else if self.history_selected >= len {
            self.history_selected = len - 1;
        }
    }
}
