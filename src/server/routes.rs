use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::AppState;
use crate::flashcards::Flashcard;
use crate::generation::GenerationError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub flashcards: Vec<Flashcard>,
    /// Set when the model output could not be parsed and a placeholder card was returned
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

pub async fn generate_flashcards_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        log::warn!("Rejected generation request: {}", e);
        ApiError::MalformedPayload
    })?;

    let text = request
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or(ApiError::TextRequired)?;

    let extraction = state.generator.generate(&text).await.map_err(|e| match e {
        GenerationError::EmptyText => ApiError::TextRequired,
        GenerationError::Provider(err) => {
            log::error!("Error generating flashcards: {}", err);
            ApiError::GenerationFailed
        }
    })?;

    Ok(Json(GenerateResponse {
        flashcards: extraction.flashcards,
        fallback: extraction.fallback,
    }))
}

pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::generation::testing::ScriptedProvider;
    use crate::generation::FlashcardGenerator;
    use crate::llm::{GenerationConfig, LlmError};
    use crate::server::build_router;

    fn app_with(provider: Arc<ScriptedProvider>) -> axum::Router {
        let generator = FlashcardGenerator::new(provider, GenerationConfig::default());
        build_router(Arc::new(AppState { generator }))
    }

    fn post_json(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/generate-flashcards")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_missing_text_is_bad_request() {
        let provider = Arc::new(ScriptedProvider::replying("[]"));
        let (status, body) = send(app_with(Arc::clone(&provider)), post_json("{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Text is required" }));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_and_blank_text_are_bad_requests() {
        for text in ["", "   "] {
            let provider = Arc::new(ScriptedProvider::replying("[]"));
            let request = post_json(json!({ "text": text }).to_string());
            let (status, body) = send(app_with(Arc::clone(&provider)), request).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Text is required");
            assert_eq!(provider.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let provider = Arc::new(ScriptedProvider::replying("[]"));
        let (status, body) = send(app_with(provider), post_json("text=hello")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn test_well_formed_reply_returns_cards() {
        let reply = json!([
            { "question": "What is H2O?", "answer": "Water" },
            { "question": "What is NaCl?", "answer": "Salt" },
        ]);
        let provider = Arc::new(ScriptedProvider::replying(&format!(
            "Here you go:\n{}",
            reply
        )));
        let request = post_json(json!({ "text": "Chemistry basics" }).to_string());
        let (status, body) = send(app_with(Arc::clone(&provider)), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "flashcards": reply }));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_card_count_stays_within_bounds() {
        for count in [1usize, 5, 10, 15] {
            let cards: Vec<Value> = (0..count)
                .map(|i| json!({ "question": format!("q{}", i), "answer": format!("a{}", i) }))
                .collect();
            let provider = Arc::new(ScriptedProvider::replying(&Value::from(cards).to_string()));
            let request = post_json(json!({ "text": "notes" }).to_string());
            let (status, body) = send(app_with(provider), request).await;

            assert_eq!(status, StatusCode::OK);
            let len = body["flashcards"].as_array().unwrap().len();
            assert!((1..=10).contains(&len), "got {} cards for {}", len, count);
        }
    }

    #[tokio::test]
    async fn test_malformed_reply_returns_flagged_fallback() {
        let reply = "The text is about the water cycle.";
        let provider = Arc::new(ScriptedProvider::replying(reply));
        let request = post_json(json!({ "text": "Evaporation..." }).to_string());
        let (status, body) = send(app_with(provider), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "flashcards": [{ "question": "Generated from AI", "answer": reply }],
                "fallback": true,
            })
        );
    }

    #[tokio::test]
    async fn test_provider_failure_is_generic_500() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(LlmError::Api {
            status: 401,
            message: "Incorrect API key provided: sk-secret".to_string(),
        })]));
        let request = post_json(json!({ "text": "notes" }).to_string());
        let (status, body) = send(app_with(provider), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to generate flashcards" }));
    }

    #[tokio::test]
    async fn test_empty_completion_is_500() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(LlmError::EmptyCompletion)]));
        let request = post_json(json!({ "text": "notes" }).to_string());
        let (status, _) = send(app_with(provider), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health() {
        let provider = Arc::new(ScriptedProvider::replying("[]"));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app_with(provider).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"OK");
    }
}
