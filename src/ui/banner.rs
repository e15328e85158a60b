use crate::app::state::AppState;
use crate::raffle::{Phase, RaffleEngine, Scheduler};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use std::time::Instant;

const SPARKLES: [&str; 4] = ["*", "+", "x", "."];

pub fn banner_text(winner: &str) -> String {
    format!("Congratulations to number {}!", winner)
}

/// Sparkle row that shifts by one cell every frame.
fn sparkle_row(width: u16, frame_no: u64) -> Line<'static> {
    let spans: Vec<Span> = (0..u64::from(width))
        .map(|x| {
            let k = (x + frame_no) as usize;
            if k % 3 == 0 {
                let color = Theme::CELEBRATION[k % Theme::CELEBRATION.len()];
                Span::styled(SPARKLES[k % SPARKLES.len()], Style::default().fg(color))
            } else {
                Span::raw(" ")
            }
        })
        .collect();
    Line::from(spans)
}

pub fn render<S: Scheduler>(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    raffle: &RaffleEngine<S>,
) {
    let draw = raffle.draw();
    let winner = match (&draw.phase, draw.winner.as_deref()) {
        (Phase::Revealed, Some(w)) => w,
        _ => return,
    };

    let celebrating = state.is_celebrating(Instant::now());
    let style = if celebrating {
        let idx = (state.tick_count / 2) as usize % Theme::CELEBRATION.len();
        Style::default()
            .fg(Theme::CELEBRATION[idx])
            .add_modifier(Modifier::BOLD)
    } else {
        Theme::digit_winner()
    };

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(Theme::ACCENT_GOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if celebrating {
        let top = Rect { height: 1, ..area };
        frame.render_widget(Paragraph::new(sparkle_row(area.width, state.tick_count)), top);
    }
    let text = Paragraph::new(Span::styled(banner_text(winner), style)).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_text_keeps_leading_zeros() {
        assert_eq!(banner_text("007"), "Congratulations to number 007!");
    }

    #[test]
    fn test_sparkle_row_width() {
        let line = sparkle_row(12, 0);
        assert_eq!(line.spans.len(), 12);
        assert_eq!(line.spans[0].content, "*");
        assert_eq!(line.spans[1].content, " ");
    }
}
