use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub history: Rect,
    pub header: Rect,
    pub digits: Rect,
    pub banner: Rect,
    pub settings: Rect,
    pub input_box: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let content = main_chunks[0];
    let status_bar = main_chunks[1];

    // Horizontal: history sidebar | gap | draw area
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Length(30), // History sidebar
            Constraint::Min(40),    // Draw area
        ])
        .split(content);

    let history = h_chunks[0];
    let right_panel = h_chunks[1];

    // Right panel: header | digits | banner | settings | input
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(7),    // Digit panel
            Constraint::Length(3), // Winner banner
            Constraint::Length(6), // Settings
            Constraint::Length(3), // Input box
        ])
        .split(right_panel);

    AppLayout {
        history,
        header: right_chunks[0],
        digits: right_chunks[1],
        banner: right_chunks[2],
        settings: right_chunks[3],
        input_box: right_chunks[4],
        status_bar,
    }
}

/// A `width` x `height` rectangle centred inside `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
