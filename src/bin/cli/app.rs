use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::runtime::Runtime;

use studybuddy_lib::client::{CardSource, GenerationClient};
use studybuddy_lib::config::Config;
use studybuddy_lib::flashcards::{FlashcardDeck, NewDeck};
use studybuddy_lib::server::GenerateResponse;
use studybuddy_lib::store::{self, DeckStore};
use studybuddy_lib::study::StudyView;

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub runtime: Runtime,
    pub store: Arc<dyn DeckStore>,
    pub source: Arc<dyn CardSource>,
}

impl App {
    /// Load configuration and connect the deck store and generation client
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path).context("Failed to load configuration")?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        let store = store::open_store(&config.store).context("Failed to open deck store")?;
        let source: Arc<dyn CardSource> = Arc::new(
            GenerationClient::new(&config.client).context("Failed to create generation client")?,
        );

        Ok(Self {
            config,
            runtime,
            store,
            source,
        })
    }

    /// List all saved decks
    pub fn list_decks(&self) -> Result<Vec<FlashcardDeck>> {
        self.runtime
            .block_on(self.store.list_decks())
            .context("Failed to list decks")
    }

    /// Find a deck by name (case-insensitive prefix match)
    pub fn find_deck(&self, name: &str) -> Result<FlashcardDeck> {
        let decks = self.list_decks()?;
        match_deck(decks, name)
    }

    pub fn delete_deck(&self, id: &str) -> Result<()> {
        self.runtime
            .block_on(self.store.delete_deck(id))
            .context("Failed to delete deck")
    }

    /// Ask the server to turn text into cards
    pub fn generate(&self, text: &str) -> Result<GenerateResponse> {
        self.runtime
            .block_on(self.source.generate(text))
            .context("Failed to generate flashcards")
    }

    /// Save cards as a new deck
    pub fn save_deck(&self, deck: NewDeck) -> Result<FlashcardDeck> {
        self.runtime
            .block_on(self.store.create_deck(&store::unique_id(), deck))
            .context("Failed to save deck")
    }

    /// Fresh study state sharing this app's store and client
    pub fn study_view(&self) -> StudyView {
        StudyView::new(self.source.clone(), self.store.clone())
    }
}

fn match_deck(decks: Vec<FlashcardDeck>, name: &str) -> Result<FlashcardDeck> {
    let name_lower = name.to_lowercase();

    // Exact match first
    if let Some(idx) = decks.iter().position(|d| d.name.to_lowercase() == name_lower) {
        return Ok(decks[idx].clone());
    }

    // Prefix match
    let matches: Vec<&FlashcardDeck> = decks
        .iter()
        .filter(|d| d.name.to_lowercase().starts_with(&name_lower))
        .collect();

    match matches.len() {
        0 => bail!(
            "No deck matching '{}'. Available decks:\n{}",
            name,
            decks.iter().map(|d| format!("  - {}", d.name)).collect::<Vec<_>>().join("\n")
        ),
        1 => Ok(matches[0].clone()),
        _ => bail!(
            "Ambiguous deck name '{}'. Matches:\n{}",
            name,
            matches.iter().map(|d| format!("  - {}", d.name)).collect::<Vec<_>>().join("\n")
        ),
    }
}
