use anyhow::Result;
use ratatui::prelude::Rect;

use studybuddy_lib::study::StudyView;

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Flip through the current cards
    Study,
    /// Typing the study text
    EditText,
    /// Typing the deck name before saving
    EditName,
    /// Browsing the saved-deck sidebar
    Decks,
}

/// Remote calls are queued by the key handler and run after the next draw,
/// so the "in progress" message is on screen while the call blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    Generate,
    Save,
    Delete { id: String, name: String },
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashKind {
    Info,
    Success,
    Error,
}

pub struct TuiState {
    pub app: App,
    pub view: StudyView,
    pub mode: Mode,

    // Sidebar state
    pub deck_selected: usize,
    pub deck_area: Option<Rect>,

    pub pending: Option<PendingAction>,
    pub flash_message: Option<(FlashKind, String)>,
    pub quit: bool,
}

impl TuiState {
    pub fn new(app: App, initial_deck: Option<&str>) -> Result<Self> {
        let view = app.study_view();
        let mut state = Self {
            app,
            view,
            mode: Mode::EditText,
            deck_selected: 0,
            deck_area: None,
            pending: None,
            flash_message: None,
            quit: false,
        };

        state.refresh_decks();

        if let Some(name) = initial_deck {
            let deck = state.app.find_deck(name)?;
            if state.view.load_deck(&deck.id) {
                state.mode = Mode::Study;
                state.select_deck(&deck.id);
            }
        }

        Ok(state)
    }

    pub fn flash(&mut self, kind: FlashKind, message: impl Into<String>) {
        self.flash_message = Some((kind, message.into()));
    }

    /// Queue a remote call and show what is happening
    pub fn queue(&mut self, action: PendingAction) {
        let message = match &action {
            PendingAction::Generate => "Generating flashcards...".to_string(),
            PendingAction::Save => "Saving deck...".to_string(),
            PendingAction::Delete { name, .. } => format!("Deleting \"{}\"...", name),
            PendingAction::Refresh => "Loading decks...".to_string(),
        };
        self.flash(FlashKind::Info, message);
        self.pending = Some(action);
    }

    /// Run the queued remote call, if any
    pub fn run_pending(&mut self) {
        let Some(action) = self.pending.take() else {
            return;
        };
        self.flash_message = None;

        match action {
            PendingAction::Generate => self.generate(),
            PendingAction::Save => self.save_deck(),
            PendingAction::Delete { id, name } => self.delete_deck(&id, &name),
            PendingAction::Refresh => self.refresh_decks(),
        }
    }

    fn refresh_decks(&mut self) {
        let result = self.app.runtime.block_on(self.view.refresh_decks());
        if result.is_err() {
            self.flash(FlashKind::Error, "Failed to load saved decks.");
        }
        self.clamp_deck_selection();
    }

    fn generate(&mut self) {
        match self.app.runtime.block_on(self.view.generate()) {
            Ok(true) => {
                self.mode = Mode::Study;
                if self.view.is_fallback() {
                    self.flash(
                        FlashKind::Error,
                        "The reply could not be split into cards; showing it as one card.",
                    );
                } else {
                    let count = self.view.flashcards().len();
                    self.flash(FlashKind::Success, format!("Generated {} flashcards", count));
                }
            }
            Ok(false) => self.flash(FlashKind::Error, "Enter some study text first."),
            Err(_) => self.flash(
                FlashKind::Error,
                "Failed to generate flashcards. Please try again.",
            ),
        }
    }

    fn save_deck(&mut self) {
        match self.app.runtime.block_on(self.view.save_deck()) {
            Ok(Some(deck)) => {
                self.mode = Mode::Study;
                self.select_deck(&deck.id);
                self.flash(FlashKind::Success, "Flashcard deck saved successfully!");
            }
            Ok(None) => self.flash(
                FlashKind::Error,
                "Enter a deck name and generate some cards first.",
            ),
            Err(_) => self.flash(FlashKind::Error, "Failed to save deck. Please try again."),
        }
    }

    fn delete_deck(&mut self, id: &str, name: &str) {
        match self.app.runtime.block_on(self.view.delete_deck(id)) {
            Ok(()) => {
                self.clamp_deck_selection();
                self.flash(FlashKind::Success, format!("Deleted \"{}\"", name));
            }
            Err(_) => self.flash(FlashKind::Error, "Failed to delete deck. Please try again."),
        }
    }

    // ==================== Sidebar ====================

    pub fn deck_move_down(&mut self) {
        if self.deck_selected + 1 < self.view.saved_decks().len() {
            self.deck_selected += 1;
        }
    }

    pub fn deck_move_up(&mut self) {
        self.deck_selected = self.deck_selected.saturating_sub(1);
    }

    pub fn load_selected_deck(&mut self) {
        let Some(deck) = self.view.saved_decks().get(self.deck_selected) else {
            return;
        };
        let (id, name) = (deck.id.clone(), deck.name.clone());

        if self.view.load_deck(&id) {
            self.mode = Mode::Study;
            self.flash(FlashKind::Info, format!("Studying \"{}\"", name));
        }
    }

    pub fn delete_selected_deck(&mut self) {
        if let Some(deck) = self.view.saved_decks().get(self.deck_selected) {
            let action = PendingAction::Delete {
                id: deck.id.clone(),
                name: deck.name.clone(),
            };
            self.queue(action);
        }
    }

    fn select_deck(&mut self, id: &str) {
        if let Some(idx) = self.view.saved_decks().iter().position(|d| d.id == id) {
            self.deck_selected = idx;
        }
    }

    fn clamp_deck_selection(&mut self) {
        let len = self.view.saved_decks().len();
        if self.deck_selected >= len {
            self.deck_selected = len.saturating_sub(1);
        }
    }
}
