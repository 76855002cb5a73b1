//! Gold Board: a terminal dashboard for precious-metal buy/sell quotes.
//!
//! A background worker polls the pricing endpoint and posts `BoardEvent`s over a
//! channel; the single UI loop applies them to the display model, drives the
//! count-up animations and renders with `ratatui`.
//!
//! - `fetcher`: the `QuoteSource` seam and its HTTP implementation.
//! - `poller`: the background poll loop and shared timing values.
//! - `model`: staleness tracking, animation, display state and the settings form.
//! - `ui`: key handling, rendering and the terminal event loop.
#![warn(missing_docs)]
pub mod fetcher;
pub mod model;
pub mod poller;
pub mod ui;
