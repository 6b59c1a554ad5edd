use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::app_state::{FlashKind, Mode, PendingAction, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Ignore input while a remote call is queued
    if state.pending.is_some() {
        return;
    }

    // Clear flash message on any keypress
    state.flash_message = None;

    match state.mode {
        Mode::Study => handle_study_key(state, key),
        Mode::EditText => handle_text_key(state, key),
        Mode::EditName => handle_name_key(state, key),
        Mode::Decks => handle_decks_key(state, key),
    }
}

fn handle_study_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Char(' ') | KeyCode::Enter => state.view.toggle_answer(),
        KeyCode::Char('l') | KeyCode::Right => state.view.next_card(),
        KeyCode::Char('h') | KeyCode::Left => state.view.prev_card(),
        KeyCode::Char('y') => mark(state, true),
        KeyCode::Char('n') => mark(state, false),
        KeyCode::Char('m') => state.view.toggle_study_mode(),
        KeyCode::Char('t') | KeyCode::Char('i') => state.mode = Mode::EditText,
        KeyCode::Char('g') => start_generate(state),
        KeyCode::Char('s') => {
            if state.view.flashcards().is_empty() {
                state.flash(FlashKind::Error, "Generate some cards before saving.");
            } else {
                state.mode = Mode::EditName;
            }
        }
        KeyCode::Char('r') => state.queue(PendingAction::Refresh),
        KeyCode::Tab => state.mode = Mode::Decks,
        _ => {}
    }
}

fn mark(state: &mut TuiState, correct: bool) {
    if !state.view.is_study_mode() {
        return;
    }
    if !state.view.is_answer_shown() {
        state.flash(FlashKind::Info, "Reveal the answer first (Space).");
    } else if !state.view.mark_answer(correct) {
        state.flash(FlashKind::Info, "This card already has a verdict.");
    }
}

fn start_generate(state: &mut TuiState) {
    if state.view.can_generate() {
        state.queue(PendingAction::Generate);
    } else {
        state.mode = Mode::EditText;
        state.flash(FlashKind::Error, "Enter some study text first.");
    }
}

fn handle_text_key(state: &mut TuiState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Study;
        }
        KeyCode::Char('g') if ctrl => start_generate(state),
        KeyCode::Enter => state.view.text.push('\n'),
        KeyCode::Tab => state.mode = Mode::Decks,
        _ => edit_field(&mut state.view.text, key),
    }
}

fn handle_name_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Study;
        }
        KeyCode::Enter => {
            if state.view.can_save() {
                state.queue(PendingAction::Save);
            } else {
                state.flash(FlashKind::Error, "Enter a deck name first.");
            }
        }
        _ => edit_field(&mut state.view.deck_name, key),
    }
}

/// Line editing shared by the input fields. Control chords never insert text.
fn edit_field(field: &mut String, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Backspace => {
            field.pop();
        }
        KeyCode::Char('u') if ctrl => field.clear(),
        KeyCode::Char(c) if !ctrl => field.push(c),
        _ => {}
    }
}

fn handle_decks_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Esc | KeyCode::Tab => state.mode = Mode::Study,
        KeyCode::Char('j') | KeyCode::Down => state.deck_move_down(),
        KeyCode::Char('k') | KeyCode::Up => state.deck_move_up(),
        KeyCode::Enter | KeyCode::Char('l') => state.load_selected_deck(),
        KeyCode::Char('d') => state.delete_selected_deck(),
        KeyCode::Char('r') => state.queue(PendingAction::Refresh),
        _ => {}
    }
}

pub fn handle_mouse(state: &mut TuiState, mouse: MouseEvent) {
    if state.pending.is_some() {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(area) = state.deck_area else {
                return;
            };
            let (col, row) = (mouse.column, mouse.row);
            if col < area.x || col >= area.x + area.width || row < area.y || row >= area.y + area.height {
                return;
            }

            state.mode = Mode::Decks;

            // Each deck takes one row inside the border
            let clicked_idx = row.saturating_sub(area.y + 1) as usize;
            if clicked_idx < state.view.saved_decks().len() {
                if state.deck_selected == clicked_idx {
                    state.load_selected_deck();
                } else {
                    state.deck_selected = clicked_idx;
                }
            }
        }
        MouseEventKind::ScrollDown if state.mode == Mode::Decks => state.deck_move_down(),
        MouseEventKind::ScrollUp if state.mode == Mode::Decks => state.deck_move_up(),
        _ => {}
    }
}
