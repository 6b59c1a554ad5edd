//! Data models for flashcards and saved decks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A question/answer pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_name: Option<String>,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: None,
            question: question.into(),
            answer: answer.into(),
            created_at: None,
            deck_name: None,
        }
    }
}

/// A named deck as stored in the deck collection.
///
/// The identifier is assigned by the store on creation and arrives as `$id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardDeck {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    /// Documents written by other clients may lack the field entirely
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    /// Unset when the document's timestamp is missing or not RFC 3339
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Accept any JSON value; only RFC 3339 strings become timestamps
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(raw)) => match DateTime::parse_from_rfc3339(&raw) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(_) => {
                log::warn!("Ignoring unparseable deck timestamp {:?}", raw);
                None
            }
        },
        _ => None,
    })
}

impl FlashcardDeck {
    pub fn card_count(&self) -> usize {
        self.flashcards.len()
    }
}

/// Payload for creating a deck; the store supplies the identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeck {
    pub name: String,
    pub flashcards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewDeck {
    pub fn new(name: String, flashcards: Vec<Flashcard>) -> Self {
        let now = Utc::now();
        Self {
            name,
            flashcards,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the identifier the store assigned
    pub fn into_deck(self, id: String) -> FlashcardDeck {
        FlashcardDeck {
            id,
            name: self.name,
            flashcards: self.flashcards,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

/// Correct/incorrect tallies for the current study run. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyStats {
    pub correct: u32,
    pub incorrect: u32,
}

impl StudyStats {
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Rounded percentage of correct answers, 0 when nothing was answered
    pub fn accuracy(&self) -> u32 {
        let answered = self.answered();
        if answered == 0 {
            return 0;
        }
        (f64::from(self.correct) / f64::from(answered) * 100.0).round() as u32
    }
}
