use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::{FlashKind, Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some((kind, ref msg)) = state.flash_message {
        let bg = match kind {
            FlashKind::Info => Color::Blue,
            FlashKind::Success => Color::Green,
            FlashKind::Error => Color::Red,
        };
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(bg).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let hints = match state.mode {
        Mode::Study => {
            " t: edit text  g: generate  s: save  Space: flip  y/n: mark  h/l: prev/next  Tab: decks  q: quit "
        }
        Mode::EditText => " Type study text  Enter: newline  Ctrl-G: generate  Ctrl-U: clear  Esc: done ",
        Mode::EditName => " Type deck name  Enter: save  Esc: cancel ",
        Mode::Decks => " j/k: navigate  Enter: study  d: delete  r: reload  Esc: back  q: quit ",
    };

    let status = Paragraph::new(hints).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
