//! Command-line arguments for the mock pricing server.
use clap::Parser;
use gold_common::net::MOCK_PORT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Local port to listen on.
    #[clap(long, default_value_t = MOCK_PORT)]
    pub port: u16,

    /// Number of good price answers before the outage starts.
    #[clap(long)]
    pub fail_after: Option<u64>,

    /// Number of price requests answered with 503 once the outage starts.
    #[clap(long, default_value_t = 0)]
    pub fail_for: u64,
}
