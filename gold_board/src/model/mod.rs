//! Display-side domain model.
//!
//! - `staleness`: time since the last successful fetch and the persistent-error flag.
//! - `animator`: count-up frames for price transitions.
//! - `display`: per-card display records and the board that applies worker events.
//! - `settings_form`: editable copy of labels and timing behind the settings dialog.

pub mod animator;
pub mod display;
pub mod settings_form;
pub mod staleness;
