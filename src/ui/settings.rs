use crate::raffle::{RaffleEngine, Scheduler};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn row<'a>(key: &'a str, label: &'a str, value: String, locked: bool) -> Line<'a> {
    let value_style = if locked {
        Theme::digit_masked()
    } else {
        Theme::title()
    };
    Line::from(vec![
        Span::styled(format!(" {:<5} ", key), Theme::key_hint()),
        Span::styled(format!("{:<18}", label), Style::default().fg(Theme::TEXT_SECONDARY)),
        Span::styled(value, value_style),
    ])
}

pub fn render<S: Scheduler>(frame: &mut Frame, area: Rect, raffle: &RaffleEngine<S>) {
    let locked = raffle.is_busy();
    let title = if locked {
        " Settings (locked) "
    } else {
        " Settings "
    };
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let cfg = raffle.config();
    let lines = vec![
        row("+/-", "Digits", cfg.digit_count.to_string(), locked),
        row("m", "Manual reveal", on_off(cfg.manual_reveal).to_string(), locked),
        row(
            "c",
            "Countdown",
            on_off(cfg.countdown_enabled).to_string(),
            locked,
        ),
        row("[/]", "Countdown length", format!("{}s", cfg.countdown_duration), locked),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
