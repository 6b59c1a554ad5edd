//! Flashcard generation from study text
//!
//! One completion call per request, with a fixed prompt. The reply is parsed
//! with [`extract_flashcards`], so malformed output still yields a card.

use std::sync::Arc;

use thiserror::Error;

use crate::flashcards::{extract_flashcards, Extraction};
use crate::llm::{ChatMessage, CompletionProvider, GenerationConfig, LlmError};

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that creates educational flashcards. \
Generate flashcards from the given text. Return a JSON array of objects, \
each with 'question' and 'answer' fields. Make 5-10 flashcards that cover \
the key concepts from the text. Focus on important facts, definitions, \
and concepts that would be useful for studying.";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Text is required")]
    EmptyText,

    #[error("Completion failed: {0}")]
    Provider(#[from] LlmError),
}

/// Build the conversation sent for `text`
pub fn build_messages(text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!("Create flashcards from this text: {}", text)),
    ]
}

pub struct FlashcardGenerator {
    provider: Arc<dyn CompletionProvider>,
    config: GenerationConfig,
}

impl FlashcardGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: GenerationConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate cards for `text`. Blank text is rejected before any call is made.
    pub async fn generate(&self, text: &str) -> Result<Extraction, GenerationError> {
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyText);
        }

        log::info!(
            "Generating flashcards from {} chars with {}",
            text.len(),
            self.provider.model()
        );

        let content = self
            .provider
            .complete(&build_messages(text), &self.config)
            .await?;

        let extraction = extract_flashcards(&content);
        log::info!(
            "Generated {} flashcards{}",
            extraction.flashcards.len(),
            if extraction.fallback { " (fallback)" } else { "" }
        );
        Ok(extraction)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm::{self, ChatMessage, CompletionProvider, GenerationConfig, LlmError};

    /// Provider returning canned replies in order and recording what it was asked
    pub struct ScriptedProvider {
        replies: Mutex<Vec<llm::Result<String>>>,
        pub calls: Mutex<Vec<(Vec<ChatMessage>, GenerationConfig)>>,
    }

    impl ScriptedProvider {
        pub fn new(replies: Vec<llm::Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(content: &str) -> Self {
            Self::new(vec![Ok(content.to_string())])
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            config: &GenerationConfig,
        ) -> llm::Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((messages.to_vec(), *config));
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Err(LlmError::EmptyCompletion);
            }
            replies.remove(0)
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }
}
