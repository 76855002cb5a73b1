//!
//! Common types and utilities shared by the gold board and the mock pricing server.
//!
//! This crate aggregates:
//! - `error`: `GoldError` and `FetchError` used across the workspace.
//! - `result`: handy `Result<T, GoldError>` alias.
//! - `instrument`: tracked instruments, sides and the pricing API field table.
//! - `labels`: user-editable label keys and their defaults.
//! - `quote`: normalized quotes and payload parsing.
//! - `format`: price and change-indicator text.
//! - `settings`: persisted settings and their file store.
//! - `event`: messages posted from the poll worker to the UI loop.
//! - `net`: endpoint constants.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod instrument;
pub mod labels;
pub mod quote;
pub mod format;
pub mod settings;
pub mod event;
pub mod net;

pub use error::{FetchError, GoldError};
pub use result::Result;
pub use event::BoardEvent;
