//! Digit boxes, the headline above them and the trigger hint below.

use crate::app::state::{AppState, FocusPanel};
use crate::raffle::engine::DrawState;
use crate::raffle::{Phase, RaffleEngine, Scheduler};
use crate::ui::theme::Theme;
use rand::RngExt;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

const BOX_WIDTH: u16 = 7;
const BOX_HEIGHT: u16 = 5;

/// What a single digit box shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitFace {
    Revealed(char),
    Shuffling,
    Masked,
}

pub fn digit_face(draw: &DrawState, idx: usize) -> DigitFace {
    if let Some(winner) = draw.winner.as_deref() {
        if idx < usize::from(draw.revealed_count) {
            if let Some(c) = winner.chars().nth(idx) {
                return DigitFace::Revealed(c);
            }
        }
    }
    if draw.phase == Phase::Raffling {
        DigitFace::Shuffling
    } else {
        DigitFace::Masked
    }
}

/// Label for the trigger, following what the next press will do.
pub fn trigger_label(draw: &DrawState, manual: bool) -> &'static str {
    if draw.is_busy() {
        return "Drawing...";
    }
    if draw.phase == Phase::Revealed {
        return "Draw again";
    }
    if manual {
        return if draw.winner.is_some() {
            "Reveal next digit"
        } else {
            "Reveal digit"
        };
    }
    "Start draw"
}

pub fn render_header<S: Scheduler>(frame: &mut Frame, area: Rect, raffle: &RaffleEngine<S>) {
    let (text, style) = if raffle.draw().phase == Phase::Revealed {
        ("We have a winner!", Theme::digit_winner())
    } else {
        ("Next winner", Theme::title())
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
        .alignment(Alignment::Center)
        .style(Style::default().bg(Theme::BG_ELEVATED));
    frame.render_widget(paragraph, area);
}

pub fn render<S: Scheduler>(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    raffle: &RaffleEngine<S>,
) {
    let focused = state.focus == FocusPanel::Draw;
    let (border_style, border_type) = if focused {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    };

    let block = Block::default()
        .title(" Draw ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draw = raffle.draw();
    let cfg = raffle.config();
    let count = u16::from(cfg.digit_count);
    let complete = draw.phase == Phase::Revealed;

    // Row of boxes, centred, with the trigger hint underneath
    let row_width = count * BOX_WIDTH + count.saturating_sub(1);
    let row = super::layout::centered(
        Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        },
        row_width,
        BOX_HEIGHT,
    );

    let mut rng = rand::rng();
    for i in 0..count {
        let x = row.x + i * (BOX_WIDTH + 1);
        if x + BOX_WIDTH > row.x + row.width {
            break;
        }
        let cell = Rect::new(x, row.y, BOX_WIDTH, row.height);
        let (glyph, style) = match digit_face(draw, usize::from(i)) {
            DigitFace::Revealed(c) if complete => (c, Theme::digit_winner()),
            DigitFace::Revealed(c) => (c, Theme::digit_revealed()),
            DigitFace::Shuffling => (
                char::from(b'0' + rng.random_range(0..10u8)),
                Theme::digit_shuffling(),
            ),
            DigitFace::Masked => ('?', Theme::digit_masked()),
        };
        let border = if complete {
            Style::default().fg(Theme::ACCENT_GOLD)
        } else {
            Theme::border()
        };
        let digit_block = Block::default()
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border);
        let digit_inner = digit_block.inner(cell);
        frame.render_widget(digit_block, cell);
        let text = Paragraph::new(Span::styled(glyph.to_string(), style))
            .alignment(Alignment::Center);
        frame.render_widget(
            text,
            Rect {
                y: digit_inner.y + digit_inner.height / 2,
                height: 1,
                ..digit_inner
            },
        );
    }

    if inner.height > 0 {
        let hint_area = Rect {
            y: inner.y + inner.height - 1,
            height: 1,
            ..inner
        };
        let label = trigger_label(draw, cfg.manual_reveal);
        let hint = Line::from(vec![
            Span::styled("[Space] ", Theme::key_hint()),
            Span::styled(
                label,
                if draw.is_busy() {
                    Theme::digit_masked()
                } else {
                    Theme::title()
                },
            ),
            Span::styled("   [r] ", Theme::key_hint()),
            Span::styled("Reset", Style::default().fg(Theme::TEXT_SECONDARY)),
        ]);
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), hint_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(phase: Phase, winner: Option<&str>, revealed: u8) -> DrawState {
        DrawState {
            phase,
            winner: winner.map(str::to_string),
            revealed_count: revealed,
        }
    }

    #[test]
    fn test_digit_faces() {
        let d = draw(Phase::Raffling, Some("407"), 1);
        assert_eq!(digit_face(&d, 0), DigitFace::Revealed('4'));
        assert_eq!(digit_face(&d, 1), DigitFace::Shuffling);

        let d = draw(Phase::Idle, Some("407"), 2);
        assert_eq!(digit_face(&d, 1), DigitFace::Revealed('0'));
        assert_eq!(digit_face(&d, 2), DigitFace::Masked);

        let d = draw(Phase::Counting, None, 0);
        assert_eq!(digit_face(&d, 0), DigitFace::Masked);
    }

    #[test]
    fn test_trigger_labels() {
        assert_eq!(trigger_label(&draw(Phase::Idle, None, 0), false), "Start draw");
        assert_eq!(trigger_label(&draw(Phase::Counting, None, 0), false), "Drawing...");
        assert_eq!(trigger_label(&draw(Phase::Raffling, None, 0), true), "Drawing...");
        assert_eq!(
            trigger_label(&draw(Phase::Revealed, Some("123"), 3), true),
            "Draw again"
        );
        assert_eq!(trigger_label(&draw(Phase::Idle, None, 0), true), "Reveal digit");
        assert_eq!(
            trigger_label(&draw(Phase::Idle, Some("123"), 1), true),
            "Reveal next digit"
        );
    }
}
