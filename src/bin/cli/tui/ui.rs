use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;

use super::app_state::TuiState;
use super::{card_panel, deck_list, input_panel, status_bar};

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Main layout: panels + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(size);

    // Horizontal split: study area (70%) | saved decks (30%)
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(outer[0]);

    let answered = state.view.stats().answered() > 0;
    let study = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Min(5),
            Constraint::Length(if answered { 3 } else { 0 }),
        ])
        .split(panels[0]);

    // Save area for mouse hit-testing
    state.deck_area = Some(panels[1]);

    input_panel::draw(f, study[0], state);
    card_panel::draw(f, study[1], state);
    if answered {
        card_panel::draw_progress(f, study[2], state);
    }
    deck_list::draw(f, panels[1], state);
    status_bar::draw(f, outer[1], state);
}
