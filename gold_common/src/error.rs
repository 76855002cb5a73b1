//! Error types shared between the board and the mock server.
//!
//! `FetchError` folds every way a price fetch can fail (transport, HTTP status,
//! payload shape) into one type; the board never tells them apart on screen.
//! `GoldError` unifies the remaining failure cases so binaries can propagate a
//! single error type.
use std::io;

use thiserror::Error;

/// Failure of a single price fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, TLS or timeout failure while talking to the endpoint.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status code.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The body was not JSON or lacked an expected object/field.
    #[error("Unexpected payload shape: {0}")]
    Payload(String),
}

/// Unified error type for the workspace.
#[derive(Error, Debug)]
pub enum GoldError {
    /// I/O error originating from files, sockets or the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A price fetch failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// An instrument key did not match any tracked instrument.
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// A label key did not match any known label.
    #[error("Unknown label: {0}")]
    UnknownLabel(String),
}
