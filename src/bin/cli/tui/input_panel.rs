use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::{Mode, TuiState};

const CURSOR: &str = "\u{2588}";

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    draw_text(f, rows[0], state);
    draw_name(f, rows[1], state);
}

fn border(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_text(f: &mut Frame, area: Rect, state: &TuiState) {
    let is_active = state.mode == Mode::EditText;
    let block = Block::default()
        .title(" Generate Flashcards ")
        .borders(Borders::ALL)
        .border_style(border(is_active));

    let text = &state.view.text;
    let paragraph = if text.is_empty() && !is_active {
        Paragraph::new(Span::styled(
            "Paste your study text here (t to edit, Ctrl-G to generate)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut content = text.clone();
        if is_active {
            content.push_str(CURSOR);
        }

        // Keep the end of long text in view
        let inner_height = area.height.saturating_sub(2) as usize;
        let line_count = content.lines().count().max(1);
        let scroll = line_count.saturating_sub(inner_height) as u16;
        Paragraph::new(content).scroll((scroll, 0))
    };

    f.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}

fn draw_name(f: &mut Frame, area: Rect, state: &TuiState) {
    let is_active = state.mode == Mode::EditName;
    let block = Block::default()
        .title(" Save Flashcard Deck ")
        .borders(Borders::ALL)
        .border_style(border(is_active));

    let line = if state.view.deck_name.is_empty() && !is_active {
        let hint = if state.view.flashcards().is_empty() {
            "Generate cards to save a deck"
        } else {
            "Enter deck name... (s)"
        };
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
    } else if is_active {
        Line::from(format!("{}{}", state.view.deck_name, CURSOR))
    } else {
        Line::from(state.view.deck_name.clone())
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}
