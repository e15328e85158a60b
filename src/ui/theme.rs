use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const BG_ELEVATED: Color = Color::Rgb(30, 32, 40);
    pub const BORDER_DIM: Color = Color::Rgb(70, 74, 88);
    pub const TEXT_PRIMARY: Color = Color::Rgb(230, 232, 238);
    pub const TEXT_SECONDARY: Color = Color::Rgb(160, 164, 178);
    pub const TEXT_MUTED: Color = Color::Rgb(105, 108, 122);
    pub const ACCENT_GOLD: Color = Color::Rgb(251, 191, 36);
    pub const ACCENT_AMBER: Color = Color::Rgb(245, 158, 11);
    pub const ACCENT_TEAL: Color = Color::Rgb(80, 200, 210);
    pub const ACCENT_RED: Color = Color::Rgb(248, 113, 113);

    /// Gold palette cycled by the celebration banner.
    pub const CELEBRATION: [Color; 5] = [
        Color::Rgb(251, 191, 36),
        Color::Rgb(245, 158, 11),
        Color::Rgb(180, 83, 9),
        Color::Rgb(255, 255, 255),
        Color::Rgb(234, 179, 8),
    ];

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn border_type() -> BorderType {
        BorderType::Plain
    }

    pub fn border_type_focused() -> BorderType {
        BorderType::Rounded
    }

    pub fn panel_bg() -> Style {
        Style::default()
    }

    pub fn panel_bg_focused() -> Style {
        Style::default().bg(Self::BG_ELEVATED)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn digit_masked() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn digit_shuffling() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn digit_revealed() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn digit_winner() -> Style {
        Style::default()
            .fg(Self::ACCENT_GOLD)
            .add_modifier(Modifier::BOLD)
    }

    pub fn history_latest() -> Style {
        Style::default()
            .fg(Self::ACCENT_GOLD)
            .add_modifier(Modifier::BOLD)
    }

    pub fn history_normal() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn selected() -> Style {
        Style::default().bg(Self::BG_ELEVATED)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_ELEVATED)
    }

    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }
}
