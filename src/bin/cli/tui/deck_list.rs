use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::app_state::{Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let is_active = state.mode == Mode::Decks;

    let block = Block::default()
        .title(" Saved Decks ")
        .borders(Borders::ALL)
        .border_style(if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let decks = state.view.saved_decks();
    if decks.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No saved decks yet",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = decks
        .iter()
        .map(|deck| {
            ListItem::new(Line::from(vec![
                Span::styled(deck.name.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!(" ({} cards)", deck.card_count()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(if is_active { Color::DarkGray } else { Color::Black })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.deck_selected));

    f.render_stateful_widget(list, area, &mut list_state);
}
