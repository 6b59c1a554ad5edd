use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::client::{ApiClientError, CardSource};
use crate::flashcards::{Flashcard, FlashcardDeck, NewDeck, StudyStats};
use crate::store::{unique_id, DeckStore, StoreError};

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Deck store error: {0}")]
    Store(#[from] StoreError),

    #[error("Generation request failed: {0}")]
    Api(#[from] ApiClientError),
}

pub type Result<T> = std::result::Result<T, ViewError>;

/// State behind the study screen.
///
/// Every operation replaces state directly once its remote call returns. A
/// failed call is logged and leaves the state as it was.
pub struct StudyView {
    source: Arc<dyn CardSource>,
    store: Arc<dyn DeckStore>,

    /// Study text typed or pasted by the user
    pub text: String,
    /// Name for the next save
    pub deck_name: String,

    flashcards: Vec<Flashcard>,
    current_card: usize,
    show_answer: bool,
    study_mode: bool,
    stats: StudyStats,
    /// Card indices already given a verdict this session
    marked: HashSet<usize>,
    saved_decks: Vec<FlashcardDeck>,
    fallback: bool,
}

impl StudyView {
    pub fn new(source: Arc<dyn CardSource>, store: Arc<dyn DeckStore>) -> Self {
        Self {
            source,
            store,
            text: String::new(),
            deck_name: String::new(),
            flashcards: Vec::new(),
            current_card: 0,
            show_answer: false,
            study_mode: false,
            stats: StudyStats::default(),
            marked: HashSet::new(),
            saved_decks: Vec::new(),
            fallback: false,
        }
    }

    pub fn flashcards(&self) -> &[Flashcard] {
        &self.flashcards
    }

    pub fn current_index(&self) -> usize {
        self.current_card
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.flashcards.get(self.current_card)
    }

    pub fn is_answer_shown(&self) -> bool {
        self.show_answer
    }

    pub fn is_study_mode(&self) -> bool {
        self.study_mode
    }

    pub fn stats(&self) -> StudyStats {
        self.stats
    }

    pub fn saved_decks(&self) -> &[FlashcardDeck] {
        &self.saved_decks
    }

    /// True when the last generation returned the placeholder card
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn can_generate(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn can_save(&self) -> bool {
        !self.deck_name.trim().is_empty() && !self.flashcards.is_empty()
    }

    // ==================== Remote operations ====================

    /// Replace the saved-deck list with the collection's contents
    pub async fn refresh_decks(&mut self) -> Result<()> {
        match self.store.list_decks().await {
            Ok(decks) => {
                self.saved_decks = decks;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load decks: {}", e);
                Err(e.into())
            }
        }
    }

    /// Generate cards from the current text. Returns false when there was nothing to send.
    pub async fn generate(&mut self) -> Result<bool> {
        if !self.can_generate() {
            return Ok(false);
        }

        let response = match self.source.generate(&self.text).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Error generating flashcards: {}", e);
                return Err(e.into());
            }
        };

        self.fallback = response.fallback;
        self.start_session(response.flashcards);
        Ok(true)
    }

    /// Save the current cards under `deck_name`. Returns the stored deck, or
    /// `None` when the name is blank or there are no cards.
    pub async fn save_deck(&mut self) -> Result<Option<FlashcardDeck>> {
        if !self.can_save() {
            return Ok(None);
        }

        let deck = NewDeck::new(self.deck_name.clone(), self.flashcards.clone());
        let created = match self.store.create_deck(&unique_id(), deck).await {
            Ok(created) => created,
            Err(e) => {
                log::error!("Failed to save deck: {}", e);
                return Err(e.into());
            }
        };

        self.deck_name.clear();
        // The deck is saved even if the list cannot be refreshed
        let _ = self.refresh_decks().await;
        Ok(Some(created))
    }

    /// Delete a saved deck and refresh the list
    pub async fn delete_deck(&mut self, id: &str) -> Result<()> {
        if let Err(e) = self.store.delete_deck(id).await {
            log::error!("Failed to delete deck: {}", e);
            return Err(e.into());
        }

        let _ = self.refresh_decks().await;
        Ok(())
    }

    // ==================== Local operations ====================

    /// Study a saved deck. Returns false if the id is not in the list.
    pub fn load_deck(&mut self, id: &str) -> bool {
        let Some(deck) = self.saved_decks.iter().find(|d| d.id == id) else {
            return false;
        };

        let cards = deck.flashcards.clone();
        self.fallback = false;
        self.start_session(cards);
        true
    }

    fn start_session(&mut self, cards: Vec<Flashcard>) {
        self.flashcards = cards;
        self.current_card = 0;
        self.show_answer = false;
        self.study_mode = true;
        self.stats = StudyStats::default();
        self.marked.clear();
    }

    pub fn next_card(&mut self) {
        if self.current_card + 1 < self.flashcards.len() {
            self.current_card += 1;
            self.show_answer = false;
        }
    }

    pub fn prev_card(&mut self) {
        if self.current_card > 0 {
            self.current_card -= 1;
            self.show_answer = false;
        }
    }

    pub fn toggle_answer(&mut self) {
        if !self.flashcards.is_empty() {
            self.show_answer = !self.show_answer;
        }
    }

    pub fn toggle_study_mode(&mut self) {
        if !self.flashcards.is_empty() {
            self.study_mode = !self.study_mode;
        }
    }

    /// Record the user's verdict on the revealed answer and move on.
    /// Ignored while the answer is hidden or once the card has a verdict.
    pub fn mark_answer(&mut self, correct: bool) -> bool {
        if !self.study_mode || !self.show_answer {
            return false;
        }
        if !self.marked.insert(self.current_card) {
            return false;
        }

        self.stats.record(correct);
        self.show_answer = false;
        self.next_card();
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::client;
    use crate::server::GenerateResponse;
    use crate::store;

    /// In-memory collection that can be told to fail
    #[derive(Default)]
    struct MemoryStore {
        decks: Mutex<Vec<FlashcardDeck>>,
        failing: AtomicBool,
    }

    impl MemoryStore {
        fn check(&self) -> store::Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Server {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl DeckStore for MemoryStore {
        async fn list_decks(&self) -> store::Result<Vec<FlashcardDeck>> {
            self.check()?;
            Ok(self.decks.lock().unwrap().clone())
        }

        async fn create_deck(&self, id: &str, deck: NewDeck) -> store::Result<FlashcardDeck> {
            self.check()?;
            let deck = deck.into_deck(id.to_string());
            self.decks.lock().unwrap().push(deck.clone());
            Ok(deck)
        }

        async fn delete_deck(&self, id: &str) -> store::Result<()> {
            self.check()?;
            let mut decks = self.decks.lock().unwrap();
            let before = decks.len();
            decks.retain(|d| d.id != id);
            if decks.len() == before {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Ok(())
        }
    }

    struct FixedSource(client::Result<GenerateResponse>);

    #[async_trait]
    impl CardSource for FixedSource {
        async fn generate(&self, _text: &str) -> client::Result<GenerateResponse> {
            match &self.0 {
                Ok(response) => Ok(response.clone()),
                Err(_) => Err(ApiClientError::Server {
                    status: 500,
                    message: "Failed to generate flashcards".to_string(),
                }),
            }
        }
    }

    fn cards(n: usize) -> Vec<Flashcard> {
        (0..n)
            .map(|i| Flashcard::new(format!("Q{}", i), format!("A{}", i)))
            .collect()
    }

    fn view_with(n: usize) -> (StudyView, Arc<MemoryStore>) {
        let source = FixedSource(Ok(GenerateResponse {
            flashcards: cards(n),
            fallback: false,
        }));
        let store = Arc::new(MemoryStore::default());
        let view = StudyView::new(Arc::new(source), Arc::clone(&store) as Arc<dyn DeckStore>);
        (view, store)
    }

    fn failing_view() -> StudyView {
        let source = FixedSource(Err(ApiClientError::InvalidUrl(String::new())));
        StudyView::new(Arc::new(source), Arc::new(MemoryStore::default()))
    }

    #[tokio::test]
    async fn test_generate_starts_study_session() {
        let (mut view, _) = view_with(3);
        view.text = "Some notes".to_string();

        assert!(view.generate().await.unwrap());
        assert_eq!(view.flashcards().len(), 3);
        assert_eq!(view.current_index(), 0);
        assert!(view.is_study_mode());
        assert!(!view.is_answer_shown());
        assert_eq!(view.current_card().unwrap().question, "Q0");
    }

    #[tokio::test]
    async fn test_generate_skips_blank_text() {
        let (mut view, _) = view_with(3);
        view.text = "  \n".to_string();

        assert!(!view.generate().await.unwrap());
        assert!(view.flashcards().is_empty());
        assert!(!view.is_study_mode());
    }

    #[tokio::test]
    async fn test_generate_failure_leaves_state() {
        let mut view = failing_view();
        view.text = "notes".to_string();

        assert!(view.generate().await.is_err());
        assert!(view.flashcards().is_empty());
        assert!(!view.is_study_mode());
    }

    #[tokio::test]
    async fn test_generate_resets_stats() {
        let (mut view, _) = view_with(3);
        view.text = "notes".to_string();
        view.generate().await.unwrap();

        view.toggle_answer();
        view.mark_answer(true);
        assert_eq!(view.stats().answered(), 1);

        view.generate().await.unwrap();
        assert_eq!(view.stats(), StudyStats::default());
        assert_eq!(view.current_index(), 0);
    }

    #[tokio::test]
    async fn test_navigation_stays_in_bounds() {
        let (mut view, _) = view_with(2);
        view.text = "notes".to_string();
        view.generate().await.unwrap();

        view.prev_card();
        assert_eq!(view.current_index(), 0);

        view.toggle_answer();
        view.next_card();
        assert_eq!(view.current_index(), 1);
        assert!(!view.is_answer_shown());

        view.next_card();
        assert_eq!(view.current_index(), 1);

        view.prev_card();
        assert_eq!(view.current_index(), 0);
    }

    #[tokio::test]
    async fn test_mark_requires_revealed_answer() {
        let (mut view, _) = view_with(3);
        view.text = "notes".to_string();
        view.generate().await.unwrap();

        assert!(!view.mark_answer(true));
        assert_eq!(view.stats().answered(), 0);
        assert_eq!(view.current_index(), 0);
    }

    #[tokio::test]
    async fn test_counters_sum_to_answered_cards() {
        let (mut view, _) = view_with(5);
        view.text = "notes".to_string();
        view.generate().await.unwrap();

        let verdicts = [true, false, true, true, false];
        for correct in verdicts {
            view.toggle_answer();
            assert!(view.mark_answer(correct));
        }

        let stats = view.stats();
        assert_eq!(stats.correct, 3);
        assert_eq!(stats.incorrect, 2);
        assert_eq!(stats.answered() as usize, verdicts.len());
        assert_eq!(stats.accuracy(), 60);
        // Marking the last card does not move past the end
        assert_eq!(view.current_index(), 4);
    }

    #[tokio::test]
    async fn test_last_card_counts_once() {
        let (mut view, _) = view_with(2);
        view.text = "notes".to_string();
        view.generate().await.unwrap();

        view.toggle_answer();
        assert!(view.mark_answer(true));
        view.toggle_answer();
        assert!(view.mark_answer(true));
        assert_eq!(view.current_index(), 1);
        assert!(!view.is_answer_shown());

        assert!(!view.mark_answer(false));
        view.toggle_answer();
        assert!(!view.mark_answer(false));
        assert!(!view.mark_answer(false));

        let stats = view.stats();
        assert_eq!(stats.answered(), 2);
        assert!(stats.answered() as usize <= view.flashcards().len());
        assert_eq!(stats.incorrect, 0);
    }

    #[tokio::test]
    async fn test_revisited_card_keeps_first_verdict() {
        let (mut view, _) = view_with(3);
        view.text = "notes".to_string();
        view.generate().await.unwrap();

        view.toggle_answer();
        assert!(view.mark_answer(false));
        view.prev_card();
        view.toggle_answer();
        assert!(!view.mark_answer(true));

        assert_eq!(view.stats().correct, 0);
        assert_eq!(view.stats().incorrect, 1);
    }

    #[tokio::test]
    async fn test_save_requires_name_and_cards() {
        let (mut view, store) = view_with(2);

        view.deck_name = "Empty".to_string();
        assert!(view.save_deck().await.unwrap().is_none());

        view.text = "notes".to_string();
        view.generate().await.unwrap();
        view.deck_name = "   ".to_string();
        assert!(view.save_deck().await.unwrap().is_none());

        assert!(store.decks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_clears_name_and_refreshes() {
        let (mut view, _) = view_with(2);
        view.text = "notes".to_string();
        view.generate().await.unwrap();

        view.deck_name = "Chapter 1".to_string();
        let saved = view.save_deck().await.unwrap().unwrap();

        assert_eq!(saved.name, "Chapter 1");
        assert_eq!(saved.card_count(), 2);
        assert!(view.deck_name.is_empty());
        assert_eq!(view.saved_decks().len(), 1);
        assert_eq!(view.saved_decks()[0].id, saved.id);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_name() {
        let (mut view, store) = view_with(2);
        view.text = "notes".to_string();
        view.generate().await.unwrap();
        view.deck_name = "Chapter 1".to_string();

        store.failing.store(true, Ordering::SeqCst);
        assert!(view.save_deck().await.is_err());
        assert_eq!(view.deck_name, "Chapter 1");
        assert!(view.saved_decks().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_deck_from_list() {
        let (mut view, _) = view_with(2);
        view.text = "notes".to_string();
        view.generate().await.unwrap();

        view.deck_name = "First".to_string();
        let first = view.save_deck().await.unwrap().unwrap();
        view.deck_name = "Second".to_string();
        let second = view.save_deck().await.unwrap().unwrap();
        assert_eq!(view.saved_decks().len(), 2);

        view.delete_deck(&first.id).await.unwrap();

        let ids: Vec<_> = view.saved_decks().iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids, vec![second.id]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_list() {
        let (mut view, store) = view_with(1);
        store
            .create_deck("d1", NewDeck::new("Kept".to_string(), cards(1)))
            .await
            .unwrap();
        view.refresh_decks().await.unwrap();

        store.failing.store(true, Ordering::SeqCst);
        assert!(view.refresh_decks().await.is_err());
        assert_eq!(view.saved_decks().len(), 1);
    }

    #[tokio::test]
    async fn test_load_deck_resets_session() {
        let (mut view, store) = view_with(3);
        store
            .create_deck("d1", NewDeck::new("Saved".to_string(), cards(4)))
            .await
            .unwrap();
        view.refresh_decks().await.unwrap();

        view.text = "notes".to_string();
        view.generate().await.unwrap();
        view.next_card();
        view.toggle_answer();
        view.mark_answer(false);

        assert!(view.load_deck("d1"));
        assert_eq!(view.flashcards().len(), 4);
        assert_eq!(view.current_index(), 0);
        assert!(!view.is_answer_shown());
        assert!(view.is_study_mode());
        assert_eq!(view.stats(), StudyStats::default());

        assert!(!view.load_deck("missing"));
    }

    #[tokio::test]
    async fn test_toggle_study_mode_needs_cards() {
        let (mut view, _) = view_with(1);
        view.toggle_study_mode();
        assert!(!view.is_study_mode());

        view.text = "notes".to_string();
        view.generate().await.unwrap();
        view.toggle_study_mode();
        assert!(!view.is_study_mode());
        // Marking is only possible in study mode
        view.toggle_answer();
        assert!(!view.mark_answer(true));
    }
}
