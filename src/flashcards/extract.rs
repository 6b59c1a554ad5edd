//! Best-effort extraction of flashcards from free-form model output
//!
//! Models are asked for a JSON array but routinely wrap it in prose or code
//! fences. The scan takes everything from the first `[` to the last `]` and
//! parses that; when nothing usable comes out, the raw text becomes the answer
//! of a single placeholder card.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use super::models::Flashcard;

/// Upper bound on cards kept from a single response
pub const MAX_CARDS: usize = 10;

/// Question used for the placeholder card
pub const FALLBACK_QUESTION: &str = "Generated from AI";

const JSON_ARRAY_PATTERN: &str = r"\[[\s\S]*\]";

/// The array pattern, compiled on first use
fn json_array_regex() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(JSON_ARRAY_PATTERN).ok()).as_ref()
}

#[derive(Deserialize)]
struct RawCard {
    question: String,
    answer: String,
}

/// Cards pulled out of a completion
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub flashcards: Vec<Flashcard>,
    /// True when the content could not be parsed and a placeholder was used
    pub fallback: bool,
}

/// Extract flashcards from model output, falling back to a single card
pub fn extract_flashcards(content: &str) -> Extraction {
    match parse_cards(content) {
        Some(mut cards) => {
            if cards.len() > MAX_CARDS {
                log::debug!("Model returned {} cards, keeping {}", cards.len(), MAX_CARDS);
                cards.truncate(MAX_CARDS);
            }
            Extraction {
                flashcards: cards,
                fallback: false,
            }
        }
        None => {
            log::warn!(
                "Could not parse flashcards from model output ({} chars), using placeholder card",
                content.len()
            );
            Extraction {
                flashcards: vec![Flashcard::new(FALLBACK_QUESTION, content)],
                fallback: true,
            }
        }
    }
}

fn parse_cards(content: &str) -> Option<Vec<Flashcard>> {
    let json = json_array_regex()
        .and_then(|re| re.find(content))
        .map(|m| m.as_str())
        .unwrap_or(content);

    let raw: Vec<RawCard> = serde_json::from_str(json).ok()?;
    if raw.is_empty() {
        return None;
    }

    Some(
        raw.into_iter()
            .map(|c| Flashcard::new(c.question, c.answer))
            .collect(),
    )
}
