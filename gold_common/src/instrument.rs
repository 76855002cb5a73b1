//! Tracked instruments, quote sides and the pricing API field table.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::GoldError;
use crate::labels::LabelKey;

/// Precious-metal products shown on the board, in display order.
///
/// The string form is the stable key used in the settings file.
#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
pub enum Instrument {
    /// Pure (24k) gold, 3.75g.
    #[strum(serialize = "Gold24k-3.75g")]
    Gold24k,
    /// 18k gold, 3.75g.
    #[strum(serialize = "Gold18k-3.75g")]
    Gold18k,
    /// 14k gold, 3.75g.
    #[strum(serialize = "Gold14k-3.75g")]
    Gold14k,
    /// Platinum, 3.75g.
    #[strum(serialize = "Platinum-3.75g")]
    Platinum,
    /// Silver, 3.75g.
    #[strum(serialize = "Silver-3.75g")]
    Silver,
}

/// Quote direction from the customer's point of view.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// Customer buys from the exchange.
    Buy,
    /// Customer sells to the exchange.
    Sell,
}

/// Payload field names for one side of one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideFields {
    /// Price field.
    pub price: &'static str,
    /// Change-rate (percent) field.
    pub rate: &'static str,
    /// Change-amount field.
    pub diff: &'static str,
}

/// Payload field names for both sides of one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiFields {
    /// Buy-side fields (`s_*`).
    pub buy: SideFields,
    /// Sell-side fields (`p_*`).
    pub sell: SideFields,
}

impl ApiFields {
    /// Fields for the given side.
    pub fn side(&self, side: Side) -> SideFields {
        match side {
            Side::Buy => self.buy,
            Side::Sell => self.sell,
        }
    }
}

macro_rules! api_fields {
    ($suffix:literal) => {
        ApiFields {
            buy: SideFields {
                price: concat!("s_", $suffix),
                rate: concat!("per_s_", $suffix),
                diff: concat!("turm_s_", $suffix),
            },
            sell: SideFields {
                price: concat!("p_", $suffix),
                rate: concat!("per_p_", $suffix),
                diff: concat!("turm_p_", $suffix),
            },
        }
    };
}

impl Instrument {
    /// Parse a settings-file key such as `Gold18k-3.75g`.
    pub fn from_key(key: &str) -> Result<Self, GoldError> {
        Self::from_str(key.trim()).map_err(|_| GoldError::UnknownInstrument(key.to_string()))
    }

    /// All instruments in display order.
    pub fn all() -> impl Iterator<Item = Instrument> {
        Self::iter()
    }

    /// Human-readable card title.
    pub fn display_name(&self) -> &'static str {
        match self {
            Instrument::Gold24k => "순금시세",
            Instrument::Gold18k => "18K 금시세",
            Instrument::Gold14k => "14K 금시세",
            Instrument::Platinum => "백금시세",
            Instrument::Silver => "은시세",
        }
    }

    /// Field names of this instrument inside the `officialPrice4` object.
    pub fn api_fields(&self) -> ApiFields {
        match self {
            Instrument::Gold24k => api_fields!("pure"),
            Instrument::Gold18k => api_fields!("18k"),
            Instrument::Gold14k => api_fields!("14k"),
            Instrument::Platinum => api_fields!("white"),
            Instrument::Silver => api_fields!("silver"),
        }
    }

    /// Label holding the note shown under this instrument's price on `side`.
    pub fn note_key(&self, side: Side) -> LabelKey {
        match (self, side) {
            (Instrument::Gold24k, Side::Buy) => LabelKey::GoldBuyNote,
            (Instrument::Gold24k, Side::Sell) => LabelKey::GoldSellNote,
            (Instrument::Gold18k, Side::Buy) => LabelKey::Gold18kBuyNote,
            (Instrument::Gold18k, Side::Sell) => LabelKey::Gold18kSellNote,
            (Instrument::Gold14k, Side::Buy) => LabelKey::Gold14kBuyNote,
            (Instrument::Gold14k, Side::Sell) => LabelKey::Gold14kSellNote,
            (Instrument::Platinum, Side::Buy) => LabelKey::PlatinumBuyNote,
            (Instrument::Platinum, Side::Sell) => LabelKey::PlatinumSellNote,
            (Instrument::Silver, Side::Buy) => LabelKey::SilverBuyNote,
            (Instrument::Silver, Side::Sell) => LabelKey::SilverSellNote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_display() {
        for instrument in Instrument::all() {
            assert_eq!(Instrument::from_key(&instrument.to_string()).unwrap(), instrument);
        }
        assert_eq!(Instrument::Gold18k.to_string(), "Gold18k-3.75g");
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            Instrument::from_key("Copper-1kg"),
            Err(GoldError::UnknownInstrument(_))
        ));
    }

    #[test]
    fn field_table_matches_endpoint_naming() {
        let fields = Instrument::Platinum.api_fields();
        assert_eq!(fields.buy.price, "s_white");
        assert_eq!(fields.buy.rate, "per_s_white");
        assert_eq!(fields.sell.diff, "turm_p_white");
        assert_eq!(Instrument::Gold24k.api_fields().side(Side::Sell).price, "p_pure");
    }

    #[test]
    fn thirty_distinct_fields() {
        let mut names: Vec<&str> = Instrument::all()
            .flat_map(|i| {
                let f = i.api_fields();
                [f.buy.price, f.buy.rate, f.buy.diff, f.sell.price, f.sell.rate, f.sell.diff]
            })
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 30);
    }
}
