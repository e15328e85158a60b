mod banner;
mod digits;
mod history;
mod input_box;
mod layout;
mod overlay;
mod settings;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use crate::raffle::{RaffleEngine, Scheduler};
use ratatui::prelude::*;

pub fn render<S: Scheduler>(frame: &mut Frame, state: &AppState, raffle: &RaffleEngine<S>) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    history::render(frame, app_layout.history, state, raffle.history().entries());
    digits::render_header(frame, app_layout.header, raffle);
    digits::render(frame, app_layout.digits, state, raffle);
    banner::render(frame, app_layout.banner, state, raffle);
    settings::render(frame, app_layout.settings, raffle);
    input_box::render(frame, app_layout.input_box, state);
    status_bar::render(frame, app_layout.status_bar, state, raffle);

    if let Some(value) = raffle.countdown_value() {
        overlay::render_countdown(frame, app_layout.digits, value);
    }
    if let Some(confirm) = state.confirm {
        overlay::render_confirm(frame, area, confirm);
    } else if state.show_help {
        overlay::render_help(frame, area);
    }
}
