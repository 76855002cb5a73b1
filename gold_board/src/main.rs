//! Gold Board: shows live buy/sell prices for gold, platinum and silver in the terminal.
//!
//! Usage example (CLI):
//! ```bash
//! gold_board --endpoint http://127.0.0.1:8090/api/main --settings ./settings.json
//! ```
//!
//! Press `a` for admin mode (hide controls and the settings dialog), `q` to quit.
mod args;

use std::fs::File;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use clap::Parser;
use gold_board::fetcher::HttpQuoteSource;
use gold_board::poller::{Poller, TimingHandle};
use gold_board::ui::{self, app::App};
use gold_common::Result;
use gold_common::settings::SettingsStore;
use log::info;

use crate::args::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_file)?;

    let store = SettingsStore::new(args.settings.trim());
    let settings = store.load();
    info!(
        "Starting board: endpoint {}, settings {}",
        args.endpoint,
        store.path().display()
    );

    let timing = TimingHandle::new(settings.timing);
    let running = Arc::new(AtomicBool::new(true));
    let (tx, rx) = crossbeam_channel::unbounded();

    let source = HttpQuoteSource::new(args.endpoint)?;
    Poller::new(source, timing.clone(), running.clone(), tx).spawn();

    let outcome = ui::run(App::new(settings, store, timing), rx);
    running.store(false, Ordering::SeqCst);
    info!("Shutting down");
    outcome
}

fn init_logger(path: &str) -> Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
