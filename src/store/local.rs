//! Deck store kept in a JSON file
//!
//! Directory structure:
//! ```text
//! {data_dir}/
//! └── decks.json           # Array of all decks
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use super::{DeckStore, Result, StoreError};
use crate::flashcards::{FlashcardDeck, NewDeck};

/// Offline deck collection
pub struct LocalDeckStore {
    data_dir: PathBuf,
    /// Serializes read-modify-write cycles on decks.json
    write_lock: Mutex<()>,
}

impl LocalDeckStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            write_lock: Mutex::new(()),
        }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("studybuddy"))
            .ok_or(StoreError::NotConfigured("data_dir"))
    }

    /// Get the decks.json path
    fn decks_path(&self) -> PathBuf {
        self.data_dir.join("decks.json")
    }

    async fn read_decks(&self) -> Result<Vec<FlashcardDeck>> {
        let decks_path = self.decks_path();
        if !fs::try_exists(&decks_path).await? {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&decks_path).await?;
        let decks: Vec<FlashcardDeck> = serde_json::from_str(&content)?;
        Ok(decks)
    }

    async fn write_decks(&self, decks: &[FlashcardDeck]) -> Result<()> {
        fs::create_dir_all(&self.data_dir).await?;
        fs::write(self.decks_path(), serde_json::to_string_pretty(decks)?).await?;
        Ok(())
    }
}

#[async_trait]
impl DeckStore for LocalDeckStore {
    async fn list_decks(&self) -> Result<Vec<FlashcardDeck>> {
        self.read_decks().await
    }

    async fn create_deck(&self, id: &str, deck: NewDeck) -> Result<FlashcardDeck> {
        let _guard = self.write_lock.lock().await;

        let mut decks = self.read_decks().await?;
        if decks.iter().any(|d| d.id == id) {
            return Err(StoreError::Conflict(id.to_string()));
        }

        let deck = deck.into_deck(id.to_string());
        decks.push(deck.clone());
        self.write_decks(&decks).await?;

        log::info!("Created deck '{}' ({})", deck.name, deck.id);
        Ok(deck)
    }

    async fn delete_deck(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut decks = self.read_decks().await?;
        let before = decks.len();
        decks.retain(|d| d.id != id);
        if decks.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.write_decks(&decks).await?;

        log::info!("Deleted deck {}", id);
        Ok(())
    }
}
