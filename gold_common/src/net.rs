//! Pricing endpoint constants shared by the board and the mock server.
use std::time::Duration;

/// Live pricing endpoint.
pub const PRICE_ENDPOINT: &str = "https://www.koreagoldx.co.kr/api/main";
/// Path served by the endpoint (and by the mock server).
pub const PRICE_PATH: &str = "/api/main";
/// User-Agent sent with every request.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
/// Upper bound for a single request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Default port of the mock pricing server.
pub const MOCK_PORT: u16 = 8090;

/// Helper to format a local endpoint URL like "http://127.0.0.1:8090/api/main".
pub fn local_endpoint(port: u16) -> String {
    format!("http://127.0.0.1:{}{}", port, PRICE_PATH)
}
