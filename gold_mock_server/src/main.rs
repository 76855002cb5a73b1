//! Mock pricing server for Gold Board.
//!
//! Serves `GET /api/main` with a synthetic `officialPrice4` payload whose prices move on
//! every request. An optional outage window answers 503 so the board's error state can
//! be exercised by hand.
//!
//! Usage example (CLI):
//! ```bash
//! gold_mock_server --port 8090 --fail-after 3 --fail-for 20
//! gold_board --endpoint http://127.0.0.1:8090/api/main
//! ```
#![warn(missing_docs)]
mod args;
pub mod model;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use clap::Parser;
use gold_common::net::local_endpoint;
use gold_common::{GoldError, Result};
use log::{error, info};
use tiny_http::{Header, Response, Server};

use crate::args::Args;
use crate::model::outage::OutagePlan;
use crate::model::service::PriceService;

/// How often the accept loop checks the shutdown flag.
const ACCEPT_TIMEOUT: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down server...");
            running.store(false, Ordering::SeqCst);
        })
        .map_err(|e| GoldError::Format(format!("Failed to set Ctrl+C handler: {}", e)))?;
    }

    let address = format!("0.0.0.0:{}", args.port);
    let server = Server::http(&address)
        .map_err(|e| GoldError::Format(format!("Failed to bind {}: {}", address, e)))?;
    let outage = OutagePlan::new(args.fail_after, args.fail_for);
    info!("Mock pricing server listening on {} ({})", address, outage.describe());
    info!("Point the board at {}", local_endpoint(args.port));

    let mut service = PriceService::new(outage);
    while running.load(Ordering::Relaxed) {
        let request = match server.recv_timeout(ACCEPT_TIMEOUT) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(e) => {
                error!("Accept failed: {}", e);
                return Err(GoldError::Io(e));
            }
        };
        let reply = service.handle(request.method().as_str(), request.url());
        let response = Response::from_string(reply.body)
            .with_status_code(reply.status)
            .with_header(json_header()?);
        if let Err(e) = request.respond(response) {
            error!("Failed to send response: {}", e);
        }
    }
    info!("Server stopped after {} price requests", service.served());
    Ok(())
}

fn json_header() -> Result<Header> {
    Header::from_bytes(&b"Content-Type"[..], &b"application/json; charset=utf-8"[..])
        .map_err(|_| GoldError::Format("Invalid Content-Type header".to_string()))
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
