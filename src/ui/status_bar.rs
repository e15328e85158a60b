use crate::app::state::*;
use crate::raffle::{RaffleEngine, Scheduler};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render<S: Scheduler>(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    raffle: &RaffleEngine<S>,
) {
    let mut parts: Vec<Span> = Vec::new();

    // Phase badge
    parts.push(Span::styled(
        format!(" [{}] ", raffle.draw().phase.label()),
        Style::default().fg(Color::Black).bg(Theme::ACCENT_AMBER),
    ));

    // Status text, falling back to the draw count
    let status = match &state.status_message {
        Some(msg) => msg.clone(),
        None => format!("{} draws recorded", raffle.history().len()),
    };
    parts.push(Span::styled(format!(" {} ", status), Theme::status_bar()));

    let focus_name = match state.focus {
        FocusPanel::Draw => "DRAW",
        FocusPanel::History => "HISTORY",
        FocusPanel::Input => "INPUT",
    };
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + focus_name.len() + 3);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", focus_name),
        Style::default().fg(Theme::ACCENT_TEAL).bg(Theme::BG_ELEVATED),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
