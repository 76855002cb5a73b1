//! Messages posted from the poll worker to the UI loop.
//!
//! The worker never touches display state; it only sends `BoardEvent`s over a channel
//! that the single UI loop drains.
use chrono::{DateTime, Local};

use crate::quote::QuoteBook;

/// Worker-to-UI message.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// A fetch succeeded.
    PricesUpdated {
        /// Fresh quotes.
        book: QuoteBook,
        /// Wall-clock time of the successful fetch.
        fetched_at: DateTime<Local>,
    },
    /// A fetch failed. `persistent` is set once the staleness threshold is crossed.
    FetchFailed {
        /// Whether the board should show the uniform error message.
        persistent: bool,
    },
    /// Seconds left until the next fetch.
    CountdownTick(u64),
}

impl BoardEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            BoardEvent::PricesUpdated { .. } => "PricesUpdated",
            BoardEvent::FetchFailed { .. } => "FetchFailed",
            BoardEvent::CountdownTick(_) => "CountdownTick",
        }
    }
}
