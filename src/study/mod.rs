//! Client-side study state
//!
//! The view model behind the study screens: generated or loaded cards, the
//! flip-card position, correct/incorrect tallies and the saved-deck list.

pub mod view;

pub use view::{StudyView, ViewError};
