//! Deck store backed by a hosted document database (Appwrite REST API)
//!
//! All decks live in one collection:
//! ```text
//! {endpoint}/databases/{database_id}/collections/{collection_id}/documents
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::{DeckStore, Result, StoreError};
use crate::config::StoreConfig;
use crate::flashcards::{FlashcardDeck, NewDeck};

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";

/// Client for the deck collection
pub struct RemoteDeckStore {
    client: Client,
    documents_url: String,
    project_id: String,
    api_key: Option<String>,
}

/// Reply to a list call
#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    total: u64,
    documents: Vec<FlashcardDeck>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocument<'a> {
    document_id: &'a str,
    data: &'a NewDeck,
}

impl RemoteDeckStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        // Normalize URL - ensure no trailing slash
        let endpoint = config.endpoint.trim_end_matches('/');

        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(StoreError::InvalidUrl(
                "Endpoint must start with http:// or https://".to_string(),
            ));
        }
        if config.database_id.is_empty() {
            return Err(StoreError::NotConfigured("database_id"));
        }
        if config.collection_id.is_empty() {
            return Err(StoreError::NotConfigured("collection_id"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            documents_url: format!(
                "{}/databases/{}/collections/{}/documents",
                endpoint,
                urlencoding::encode(&config.database_id),
                urlencoding::encode(&config.collection_id)
            ),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url, urlencoding::encode(id))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(PROJECT_HEADER, &self.project_id);
        match &self.api_key {
            Some(key) => request.header(KEY_HEADER, key),
            None => request,
        }
    }

    /// Map error statuses onto store errors
    async fn check(response: Response, id: &str) -> Result<Response> {
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StoreError::AuthFailed),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(id.to_string())),
            StatusCode::CONFLICT => Err(StoreError::Conflict(id.to_string())),
            status if !status.is_success() => Err(StoreError::Server {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
            _ => Ok(response),
        }
    }
}

#[async_trait]
impl DeckStore for RemoteDeckStore {
    async fn list_decks(&self) -> Result<Vec<FlashcardDeck>> {
        let response = self
            .authorize(self.client.get(&self.documents_url))
            .send()
            .await?;
        let response = Self::check(response, "collection").await?;

        let list: DocumentList = response.json().await?;
        log::debug!("Listed {} of {} decks", list.documents.len(), list.total);
        Ok(list.documents)
    }

    async fn create_deck(&self, id: &str, deck: NewDeck) -> Result<FlashcardDeck> {
        let body = CreateDocument {
            document_id: id,
            data: &deck,
        };

        let response = self
            .authorize(self.client.post(&self.documents_url))
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response, id).await?;

        let created: FlashcardDeck = response.json().await?;
        log::info!("Created deck '{}' ({})", created.name, created.id);
        Ok(created)
    }

    async fn delete_deck(&self, id: &str) -> Result<()> {
        let response = self
            .authorize(self.client.delete(self.document_url(id)))
            .send()
            .await?;
        Self::check(response, id).await?;

        log::info!("Deleted deck {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use super::*;
    use crate::flashcards::Flashcard;

    type Documents = Arc<Mutex<Vec<Value>>>;

    fn authorized(headers: &HeaderMap) -> bool {
        headers.get(PROJECT_HEADER).map(|v| v == "proj").unwrap_or(false)
    }

    async fn list(State(docs): State<Documents>, headers: HeaderMap) -> impl IntoResponse {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "no project" })));
        }
        let docs = docs.lock().unwrap().clone();
        (StatusCode::OK, Json(json!({ "total": docs.len(), "documents": docs })))
    }

    async fn create(State(docs): State<Documents>, Json(body): Json<Value>) -> impl IntoResponse {
        let mut doc = body["data"].clone();
        doc["$id"] = body["documentId"].clone();
        doc["$collectionId"] = json!("decks");
        docs.lock().unwrap().push(doc.clone());
        (StatusCode::CREATED, Json(doc))
    }

    async fn remove(State(docs): State<Documents>, Path(id): Path<String>) -> StatusCode {
        let mut docs = docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|d| d["$id"] != json!(id));
        if docs.len() == before {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::NO_CONTENT
        }
    }

    /// Serve a fake collection on a random local port
    async fn fake_database() -> (String, Documents) {
        let docs: Documents = Arc::new(Mutex::new(Vec::new()));
        let base = "/v1/databases/main/collections/decks/documents";
        let app = Router::new()
            .route(base, get(list).post(create))
            .route(&format!("{}/{{id}}", base), delete(remove))
            .with_state(Arc::clone(&docs));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (format!("http://127.0.0.1:{}/v1", port), docs)
    }

    fn store_config(endpoint: String) -> StoreConfig {
        StoreConfig {
            endpoint,
            project_id: "proj".to_string(),
            database_id: "main".to_string(),
            collection_id: "decks".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        let config = store_config("ftp://example.com".to_string());
        assert!(matches!(RemoteDeckStore::new(&config), Err(StoreError::InvalidUrl(_))));
    }

    #[test]
    fn test_requires_collection() {
        let mut config = store_config("https://example.com/v1/".to_string());
        config.collection_id.clear();
        assert!(matches!(
            RemoteDeckStore::new(&config),
            Err(StoreError::NotConfigured("collection_id"))
        ));
    }

    #[test]
    fn test_document_urls() {
        let store = RemoteDeckStore::new(&store_config("https://example.com/v1/".to_string())).unwrap();
        assert_eq!(
            store.document_url("abc"),
            "https://example.com/v1/databases/main/collections/decks/documents/abc"
        );
    }

    #[tokio::test]
    async fn test_create_list_delete() {
        let (endpoint, docs) = fake_database().await;
        let store = RemoteDeckStore::new(&store_config(endpoint)).unwrap();

        assert!(store.list_decks().await.unwrap().is_empty());

        let deck = NewDeck::new(
            "Biology".to_string(),
            vec![Flashcard::new("What is ATP?", "Energy currency of the cell")],
        );
        let created = store.create_deck("deck1", deck).await.unwrap();
        assert_eq!(created.id, "deck1");
        assert_eq!(created.card_count(), 1);

        // The document body carries the deck fields
        let stored = docs.lock().unwrap()[0].clone();
        assert_eq!(stored["name"], "Biology");
        assert_eq!(stored["flashcards"][0]["question"], "What is ATP?");
        assert!(stored.get("createdAt").is_some());

        let decks = store.list_decks().await.unwrap();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].name, "Biology");

        store.delete_deck("deck1").await.unwrap();
        assert!(store.list_decks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_deck() {
        let (endpoint, _docs) = fake_database().await;
        let store = RemoteDeckStore::new(&store_config(endpoint)).unwrap();

        let result = store.delete_deck("nope").await;
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "nope"));
    }

    #[tokio::test]
    async fn test_wrong_project_is_auth_failure() {
        let (endpoint, _docs) = fake_database().await;
        let mut config = store_config(endpoint);
        config.project_id = "other".to_string();
        let store = RemoteDeckStore::new(&config).unwrap();

        assert!(matches!(store.list_decks().await, Err(StoreError::AuthFailed)));
    }
}
