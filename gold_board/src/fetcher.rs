//! Fetching quotes from the pricing endpoint.
//!
//! `QuoteSource` is the seam between the poll loop and the network; the loop only ever
//! sees a `QuoteBook` or a `FetchError`.
use gold_common::net::{REQUEST_TIMEOUT, USER_AGENT};
use gold_common::quote::QuoteBook;
use gold_common::{FetchError, GoldError};
use log::debug;
use reqwest::blocking::Client;

/// Anything that can produce a fresh set of quotes.
pub trait QuoteSource: Send {
    /// Perform one blocking fetch.
    fn fetch(&mut self) -> Result<QuoteBook, FetchError>;
}

/// Blocking HTTP client for the pricing endpoint.
pub struct HttpQuoteSource {
    client: Client,
    endpoint: String,
}

impl HttpQuoteSource {
    /// Build a client for `endpoint` with the shared User-Agent and request timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, GoldError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GoldError::Format(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint this source polls.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch(&mut self) -> Result<QuoteBook, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        debug!("Fetched {} bytes from {}", body.len(), self.endpoint);
        QuoteBook::from_json_slice(&body)
    }
}
