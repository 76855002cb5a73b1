//! Building blocks of the mock pricing endpoint.
//!
//! - `price_generator`: random-walk quote book for every instrument.
//! - `outage`: which request numbers answer with a server error.
//! - `service`: routes a request to a status code and body.
pub mod outage;
pub mod price_generator;
pub mod service;
