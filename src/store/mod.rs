//! Deck persistence
//!
//! Decks live in a single collection of a hosted document database. The
//! [`DeckStore`] trait covers the three calls the app makes against it
//! (list, create, delete); reads go through `list_decks`.
//!
//! Writes are single calls with no retry and no conflict resolution.

pub mod local;
pub mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{StoreConfig, StoreKind};
use crate::flashcards::{FlashcardDeck, NewDeck};

pub use local::LocalDeckStore;
pub use remote::RemoteDeckStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed")]
    AuthFailed,

    #[error("Deck not found: {0}")]
    NotFound(String),

    #[error("Deck already exists: {0}")]
    Conflict(String),

    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Store is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The deck collection
#[async_trait]
pub trait DeckStore: Send + Sync {
    /// List every deck in the collection
    async fn list_decks(&self) -> Result<Vec<FlashcardDeck>>;

    /// Create a deck under the requested unique id
    async fn create_deck(&self, id: &str, deck: NewDeck) -> Result<FlashcardDeck>;

    /// Delete a deck permanently
    async fn delete_deck(&self, id: &str) -> Result<()>;
}

/// Generate a document id accepted by the database (32 hex chars)
pub fn unique_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Build the store selected by configuration
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn DeckStore>> {
    match config.kind {
        StoreKind::Remote => Ok(Arc::new(RemoteDeckStore::new(config)?)),
        StoreKind::Local => {
            let data_dir = match &config.data_dir {
                Some(dir) => dir.clone(),
                None => LocalDeckStore::default_data_dir()?,
            };
            Ok(Arc::new(LocalDeckStore::new(data_dir)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_id_shape() {
        let id = unique_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, unique_id());
    }

    #[test]
    fn test_open_local_store() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = StoreConfig {
            kind: StoreKind::Local,
            data_dir: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        assert!(open_store(&config).is_ok());
    }

    #[test]
    fn test_open_remote_store_requires_endpoint() {
        let config = StoreConfig {
            kind: StoreKind::Remote,
            endpoint: String::new(),
            ..Default::default()
        };

        assert!(matches!(open_store(&config), Err(StoreError::InvalidUrl(_))));
    }
}
