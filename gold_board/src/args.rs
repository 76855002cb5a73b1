//! Command-line arguments for Gold Board.
use clap::Parser;
use gold_common::net::PRICE_ENDPOINT;
use gold_common::settings::DEFAULT_SETTINGS_FILE;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Pricing endpoint to poll.
    #[clap(long, default_value = PRICE_ENDPOINT)]
    pub endpoint: String,

    /// Settings file; created on the first save.
    #[clap(long, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: String,

    /// Log file. The terminal belongs to the board, so logs never go to stderr.
    #[clap(long, default_value = "gold_board.log")]
    pub log_file: String,
}
