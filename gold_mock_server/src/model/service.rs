//! Request routing for the mock endpoint, kept free of socket handling.
use gold_common::net::PRICE_PATH;
use log::{info, warn};

use crate::model::outage::OutagePlan;
use crate::model::price_generator::PriceGenerator;

/// Status code and JSON body to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl Reply {
    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }
}

/// Price endpoint state: the generator, the outage plan and the request counter.
pub struct PriceService {
    generator: PriceGenerator,
    outage: OutagePlan,
    served: u64,
}

impl PriceService {
    /// Create a service with fresh prices.
    pub fn new(outage: OutagePlan) -> Self {
        Self {
            generator: PriceGenerator::new(),
            outage,
            served: 0,
        }
    }

    /// Answer one request. Only `GET` on the price path counts toward the outage window.
    pub fn handle(&mut self, method: &str, url: &str) -> Reply {
        let path = url.split('?').next().unwrap_or(url);
        if !method.eq_ignore_ascii_case("GET") || path != PRICE_PATH {
            warn!("No route for {} {}", method, url);
            return Reply::error(404, "not found");
        }

        self.served += 1;
        if self.outage.is_failing(self.served) {
            info!("Request #{} inside the outage window, answering 503", self.served);
            return Reply::error(503, "service unavailable");
        }

        let payload = self.generator.tick().to_payload();
        info!("Request #{} served", self.served);
        Reply {
            status: 200,
            body: payload.to_string(),
        }
    }

    /// Number of price requests seen so far.
    pub fn served(&self) -> u64 {
        self.served
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gold_common::quote::QuoteBook;

    #[test]
    fn serves_a_parsable_book() {
        let mut service = PriceService::new(OutagePlan::default());
        let reply = service.handle("GET", PRICE_PATH);
        assert_eq!(reply.status, 200);
        let book = QuoteBook::from_json_slice(reply.body.as_bytes()).unwrap();
        assert_eq!(book.len(), 5);
    }

    #[test]
    fn query_string_is_ignored() {
        let mut service = PriceService::new(OutagePlan::default());
        let reply = service.handle("GET", &format!("{}?t=1", PRICE_PATH));
        assert_eq!(reply.status, 200);
    }

    #[test]
    fn outage_window_answers_503() {
        let mut service = PriceService::new(OutagePlan::new(Some(1), 2));
        let statuses: Vec<u16> = (0..4).map(|_| service.handle("GET", PRICE_PATH).status).collect();
        assert_eq!(statuses, vec![200, 503, 503, 200]);
        assert_eq!(service.served(), 4);
    }

    #[test]
    fn other_routes_are_404_and_not_counted() {
        let mut service = PriceService::new(OutagePlan::default());
        assert_eq!(service.handle("GET", "/").status, 404);
        assert_eq!(service.handle("POST", PRICE_PATH).status, 404);
        assert_eq!(service.served(), 0);
    }
}
