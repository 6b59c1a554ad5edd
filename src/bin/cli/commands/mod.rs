pub mod decks;
pub mod delete;
pub mod generate;
pub mod show;
