//! Normalized quotes and parsing of the pricing endpoint payload.
//!
//! The endpoint returns a JSON document with an `officialPrice4` object holding six
//! fields per instrument (see [`Instrument::api_fields`]). A missing object or field is
//! a payload error; a field that is present but not a usable number becomes `0`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::FetchError;
use crate::instrument::{Instrument, Side, SideFields};

/// Name of the payload object carrying the official prices.
pub const PAYLOAD_ROOT: &str = "officialPrice4";

/// One side of one instrument's quote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Quote {
    /// Price in won. Never negative.
    pub price: u64,
    /// Signed change rate as text, without the percent sign (e.g. `-1.2`).
    pub change_rate: String,
    /// Signed change amount in won.
    pub change_amount: i64,
}

/// Both sides of one instrument's quote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstrumentQuote {
    /// Customer buy side.
    pub buy: Quote,
    /// Customer sell side.
    pub sell: Quote,
}

impl InstrumentQuote {
    /// Quote for `side`.
    pub fn side(&self, side: Side) -> &Quote {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }
}

/// Quotes for every instrument from a single successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuoteBook {
    quotes: BTreeMap<Instrument, InstrumentQuote>,
}

impl QuoteBook {
    /// Parse the raw response body.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, FetchError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| FetchError::Payload(e.to_string()))?;
        Self::from_payload(&value)
    }

    /// Map the decoded payload into a book.
    pub fn from_payload(payload: &Value) -> Result<Self, FetchError> {
        let official = payload
            .get(PAYLOAD_ROOT)
            .and_then(Value::as_object)
            .ok_or_else(|| FetchError::Payload(format!("missing `{PAYLOAD_ROOT}` object")))?;

        let mut quotes = BTreeMap::new();
        for instrument in Instrument::all() {
            let fields = instrument.api_fields();
            quotes.insert(
                instrument,
                InstrumentQuote {
                    buy: read_side(official, fields.buy)?,
                    sell: read_side(official, fields.sell)?,
                },
            );
        }
        Ok(Self { quotes })
    }

    /// Encode the book in the endpoint's payload format.
    pub fn to_payload(&self) -> Value {
        let mut official = Map::new();
        for (instrument, quote) in self.iter() {
            let fields = instrument.api_fields();
            for side in [Side::Buy, Side::Sell] {
                let names = fields.side(side);
                let quote = quote.side(side);
                official.insert(names.price.to_string(), Value::from(quote.price));
                let rate = quote
                    .change_rate
                    .parse::<f64>()
                    .map(Value::from)
                    .unwrap_or_else(|_| Value::from(quote.change_rate.clone()));
                official.insert(names.rate.to_string(), rate);
                official.insert(names.diff.to_string(), Value::from(quote.change_amount));
            }
        }
        let mut payload = Map::new();
        payload.insert(PAYLOAD_ROOT.to_string(), Value::Object(official));
        Value::Object(payload)
    }

    /// Quote for one instrument, if present.
    pub fn get(&self, instrument: Instrument) -> Option<&InstrumentQuote> {
        self.quotes.get(&instrument)
    }

    /// Insert or replace an instrument's quote.
    pub fn insert(&mut self, instrument: Instrument, quote: InstrumentQuote) {
        self.quotes.insert(instrument, quote);
    }

    /// Iterate in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Instrument, &InstrumentQuote)> {
        self.quotes.iter().map(|(instrument, quote)| (*instrument, quote))
    }

    /// Number of instruments in the book.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the book holds no instruments.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

fn read_side(official: &Map<String, Value>, fields: SideFields) -> Result<Quote, FetchError> {
    let field = |name: &str| {
        official
            .get(name)
            .ok_or_else(|| FetchError::Payload(format!("missing field `{name}`")))
    };
    Ok(Quote {
        price: parse_amount(field(fields.price)?).max(0) as u64,
        change_rate: rate_text(field(fields.rate)?),
        change_amount: parse_amount(field(fields.diff)?),
    })
}

/// Read a whole-won amount from a number or a (possibly comma-grouped) string.
///
/// Anything unusable yields `0`. Fractions are truncated.
pub fn parse_amount(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let cleaned: String = s.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
            cleaned
                .parse::<i64>()
                .ok()
                .or_else(|| cleaned.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn rate_text(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().trim_end_matches('%').to_string(),
        _ => "0".to_string(),
    }
}
