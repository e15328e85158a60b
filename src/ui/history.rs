use crate::app::state::{AppState, FocusPanel};
use crate::raffle::HistoryEntry;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

fn entry_line(entry: &HistoryEntry, latest: bool) -> Line<'_> {
    let number_style = if latest {
        Theme::history_latest()
    } else {
        Theme::history_normal()
    };
    let mut spans = vec![
        Span::styled(
            format!("{} ", entry.timestamp),
            Style::default().fg(Theme::TEXT_MUTED),
        ),
        Span::styled(entry.number.as_str(), number_style),
    ];
    if !entry.winner_name.is_empty() {
        spans.push(Span::styled(
            format!("  {}", entry.winner_name),
            Style::default().fg(Theme::TEXT_SECONDARY),
        ));
    }
    Line::from(spans)
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, entries: &[HistoryEntry]) {
    let focused = state.focus == FocusPanel::History;
    let (border_style, border_type) = if focused {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    };

    let block = Block::default()
        .title(format!(" History ({}) ", entries.len()))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    if entries.is_empty() {
        let items = vec![ListItem::new(Span::styled(
            " No results yet",
            Theme::digit_masked(),
        ))];
        frame.render_widget(List::new(items).block(block), area);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| ListItem::new(entry_line(entry, i == 0)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::selected());

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(state.history_selected.min(entries.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}
