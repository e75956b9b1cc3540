//! Nova UI: egui screens driven by a [`state::UiState`] projection.
//!
//! Panels never call the sync layer directly; they return a
//! [`state::UiAction`] and the app crate dispatches it.

pub mod panels;
pub mod state;
pub mod theme;
