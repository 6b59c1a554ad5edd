//! Study Buddy: flashcards generated from study text by an LLM.
//!
//! - [`server`] exposes `POST /api/generate-flashcards`, which forwards text to
//!   a chat-completion provider and extracts question/answer cards from the reply.
//! - [`study`] holds the client-side study state and talks to the endpoint and
//!   to the deck collection in [`store`].

use std::sync::Arc;

pub mod client;
pub mod config;
pub mod flashcards;
pub mod generation;
pub mod llm;
pub mod server;
pub mod store;
pub mod study;

use config::Config;
use generation::FlashcardGenerator;
use llm::{GenerationConfig, OpenAIClient};
use server::AppState;

/// Build the generator from configuration and serve the endpoint until shutdown
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let api_key = config.llm.require_api_key()?.to_string();
    let provider = OpenAIClient::new(&config.llm, api_key)?;
    log::info!(
        "Using model {} at {}",
        config.llm.model,
        config.llm.base_url
    );

    let generation_config = GenerationConfig {
        temperature: config.llm.temperature,
        max_tokens: config.llm.max_tokens,
    };
    let state = Arc::new(AppState {
        generator: FlashcardGenerator::new(Arc::new(provider), generation_config),
    });

    server::serve(&config.server, state).await?;
    Ok(())
}
