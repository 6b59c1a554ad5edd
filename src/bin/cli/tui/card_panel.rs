use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::{Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let is_active = state.mode == Mode::Study;
    let view = &state.view;

    let block = Block::default()
        .title(" Flashcards ")
        .borders(Borders::ALL)
        .border_style(if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let lines = if view.flashcards().is_empty() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Generate cards from your study text, or pick a saved deck.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  t: edit text  g: generate  Tab: saved decks",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else if view.is_study_mode() {
        study_lines(state)
    } else {
        overview_lines(state)
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn study_lines(state: &TuiState) -> Vec<Line<'static>> {
    let view = &state.view;
    let stats = view.stats();
    let total = view.flashcards().len();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Card {} of {}", view.current_index() + 1, total),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("    "),
            Span::styled(format!("\u{2713} {}", stats.correct), Style::default().fg(Color::Green)),
            Span::raw("  "),
            Span::styled(format!("\u{2717} {}", stats.incorrect), Style::default().fg(Color::Red)),
        ]),
        Line::from(""),
    ];

    let Some(card) = view.current_card() else {
        return lines;
    };

    let (label, body, color) = if view.is_answer_shown() {
        ("Answer:", card.answer.clone(), Color::Green)
    } else {
        ("Question:", card.question.clone(), Color::Yellow)
    };

    lines.push(Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))));
    for text_line in body.lines() {
        lines.push(Line::from(Span::styled(
            text_line.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    let hints = if view.is_answer_shown() {
        "Space: hide answer  y: correct  n: incorrect  h/l: prev/next"
    } else {
        "Space: show answer  h/l: prev/next  m: exit study mode"
    };
    lines.push(Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray))));

    lines
}

fn overview_lines(state: &TuiState) -> Vec<Line<'static>> {
    let view = &state.view;
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} cards  (m: study mode)", view.flashcards().len()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    for (i, card) in view.flashcards().iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>3}. ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::raw(card.question.clone()),
        ]));
    }

    lines
}

/// Correct, incorrect and accuracy for the current run
pub fn draw_progress(f: &mut Frame, area: Rect, state: &TuiState) {
    let stats = state.view.stats();

    let block = Block::default()
        .title(" Study Progress ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let line = Line::from(vec![
        Span::raw("Correct: "),
        Span::styled(stats.correct.to_string(), Style::default().fg(Color::Green)),
        Span::raw("   Incorrect: "),
        Span::styled(stats.incorrect.to_string(), Style::default().fg(Color::Red)),
        Span::raw("   Accuracy: "),
        Span::styled(
            format!("{}%", stats.accuracy()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}
