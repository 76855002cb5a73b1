//! Synthetic prices for the mock endpoint.
//!
//! Every instrument side moves by a small random walk on each tick. The change fields
//! report the move against the previous tick, the way the live endpoint reports the move
//! against the previous official price.
use gold_common::instrument::{Instrument, Side};
use gold_common::quote::{InstrumentQuote, Quote, QuoteBook};
use rand::Rng;

/// Prices are quoted in whole hundreds of won.
const PRICE_STEP: u64 = 100;

/// Starting (buy, sell) prices per instrument.
fn base_prices(instrument: Instrument) -> (u64, u64) {
    match instrument {
        Instrument::Gold24k => (600_000, 520_000),
        Instrument::Gold18k => (450_000, 382_000),
        Instrument::Gold14k => (350_000, 296_000),
        Instrument::Platinum => (250_000, 190_000),
        Instrument::Silver => (7_500, 5_500),
    }
}

/// Random-walk generator holding the current book.
pub struct PriceGenerator {
    book: QuoteBook,
}

impl Default for PriceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceGenerator {
    /// Start from the base prices with no change.
    pub fn new() -> Self {
        let mut book = QuoteBook::default();
        for instrument in Instrument::all() {
            let (buy, sell) = base_prices(instrument);
            book.insert(
                instrument,
                InstrumentQuote {
                    buy: Self::unchanged(buy),
                    sell: Self::unchanged(sell),
                },
            );
        }
        Self { book }
    }

    fn unchanged(price: u64) -> Quote {
        Quote {
            price,
            change_rate: "0.00".to_string(),
            change_amount: 0,
        }
    }

    /// Calculate the next price: a uniform move within `[-1%, +1%]`, rounded to
    /// `PRICE_STEP` and never below one step.
    pub fn next_price(current: u64) -> u64 {
        let mut rng = rand::rng();
        let change: f64 = rng.random_range(-0.01..0.01);
        let moved = current as f64 * (1.0 + change);
        let steps = (moved / PRICE_STEP as f64).round() as u64;
        steps.max(1) * PRICE_STEP
    }

    /// Move every price once and return the new book.
    pub fn tick(&mut self) -> &QuoteBook {
        let mut next = QuoteBook::default();
        for (instrument, current) in self.book.iter() {
            let mut moved = current.clone();
            for side in [Side::Buy, Side::Sell] {
                let previous = current.side(side).price;
                let quote = Self::moved_quote(previous, Self::next_price(previous));
                match side {
                    Side::Buy => moved.buy = quote,
                    Side::Sell => moved.sell = quote,
                }
            }
            next.insert(instrument, moved);
        }
        self.book = next;
        &self.book
    }

    fn moved_quote(previous: u64, price: u64) -> Quote {
        let diff = price as i64 - previous as i64;
        let rate = if previous == 0 {
            0.0
        } else {
            diff as f64 * 100.0 / previous as f64
        };
        Quote {
            price,
            change_rate: format!("{:.2}", rate),
            change_amount: diff,
        }
    }

    /// Current book without moving it.
    pub fn book(&self) -> &QuoteBook {
        &self.book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_every_instrument() {
        let generator = PriceGenerator::new();
        assert_eq!(generator.book().len(), 5);
        let silver = generator.book().get(Instrument::Silver).unwrap();
        assert_eq!(silver.buy.price, 7_500);
        assert_eq!(silver.sell.change_amount, 0);
    }

    #[test]
    fn next_price_stays_within_one_percent_and_on_step() {
        for _ in 0..200 {
            let price = PriceGenerator::next_price(500_000);
            assert_eq!(price % PRICE_STEP, 0);
            assert!((495_000..=505_000).contains(&price), "{}", price);
        }
        assert_eq!(PriceGenerator::next_price(0), PRICE_STEP);
    }

    #[test]
    fn tick_reports_change_against_previous_price() {
        let mut generator = PriceGenerator::new();
        let before = generator.book().clone();
        let after = generator.tick().clone();
        for (instrument, quote) in after.iter() {
            let old = before.get(instrument).unwrap();
            for side in [Side::Buy, Side::Sell] {
                let diff = quote.side(side).price as i64 - old.side(side).price as i64;
                assert_eq!(quote.side(side).change_amount, diff);
                assert!(quote.side(side).change_rate.parse::<f64>().is_ok());
            }
        }
    }

    #[test]
    fn moved_quote_formats_rate() {
        let quote = PriceGenerator::moved_quote(200_000, 199_000);
        assert_eq!(quote.change_amount, -1_000);
        assert_eq!(quote.change_rate, "-0.50");
    }
}
