//! Modal layers drawn over the main screen.

use crate::app::commands::HELP_LINES;
use crate::app::state::Confirm;
use crate::raffle::CountdownValue;
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

pub fn render_countdown(frame: &mut Frame, area: Rect, value: CountdownValue) {
    let rect = centered(area, 15, 5);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Theme::ACCENT_AMBER))
        .style(Theme::panel_bg_focused());
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let style = match value {
        CountdownValue::Go => Theme::digit_winner(),
        CountdownValue::Seconds(_) => Theme::title(),
    };
    let text = Paragraph::new(Span::styled(value.to_string(), style)).alignment(Alignment::Center);
    frame.render_widget(
        text,
        Rect {
            y: inner.y + inner.height / 2,
            height: 1,
            ..inner
        },
    );
}

pub fn render_confirm(frame: &mut Frame, area: Rect, confirm: Confirm) {
    let prompt = confirm.prompt();
    let rect = centered(area, prompt.len() as u16 + 6, 5);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(Style::default().fg(Theme::ACCENT_RED).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Theme::ACCENT_RED))
        .style(Theme::panel_bg_focused());

    let lines = vec![
        Line::from(Span::styled(prompt, Theme::title())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Theme::key_hint()),
            Span::raw(" yes   "),
            Span::styled("[n]", Theme::key_hint()),
            Span::raw(" no"),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        rect,
    );
}

const KEY_LINES: &[(&str, &str)] = &[
    ("Space/Enter", "Draw or reveal"),
    ("r", "Reset draw"),
    ("+ / -", "Digits"),
    ("m", "Toggle manual reveal"),
    ("c", "Toggle countdown"),
    ("[ / ]", "Countdown length"),
    ("x / X", "Clear history / wipe all"),
    ("Tab", "Switch panel"),
    ("q", "Quit"),
];

pub fn render_help(frame: &mut Frame, area: Rect) {
    let height = (KEY_LINES.len() + HELP_LINES.len() + 5) as u16;
    let rect = centered(area, 60, height);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(" Help ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .style(Theme::panel_bg_focused());

    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!(" {:<14}", key), Theme::key_hint()),
            Span::styled(desc, Style::default().fg(Theme::TEXT_SECONDARY)),
        ])
    };

    let mut lines = vec![Line::from(Span::styled(" Keys", Theme::title()))];
    lines.extend(KEY_LINES.iter().map(|&(k, d)| entry(k, d)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Commands", Theme::title())));
    lines.extend(HELP_LINES.iter().map(|&(k, d)| entry(k, d)));

    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
