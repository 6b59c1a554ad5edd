//! Flashcards and decks
//!
//! This module provides:
//! - Card, deck and study-tally models
//! - Extraction of cards from free-form model output

pub mod extract;
pub mod models;

pub use extract::{extract_flashcards, Extraction};
pub use models::*;
