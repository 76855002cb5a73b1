//! User-editable label keys and their built-in defaults.

use std::collections::BTreeMap;
use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::GoldError;

/// Every label the user can override from the settings form.
///
/// The string form is the key used under `custom_texts` in the settings file.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Display, EnumString, EnumIter, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum LabelKey {
    #[strum(serialize = "title")]
    Title,
    #[strum(serialize = "buy_header")]
    BuyHeader,
    #[strum(serialize = "sell_header")]
    SellHeader,
    #[strum(serialize = "hide_text")]
    HideText,
    #[strum(serialize = "error_message")]
    ErrorMessage,
    #[strum(serialize = "gold_buy_note")]
    GoldBuyNote,
    #[strum(serialize = "gold_sell_note")]
    GoldSellNote,
    #[strum(serialize = "gold18k_buy_note")]
    Gold18kBuyNote,
    #[strum(serialize = "gold18k_sell_note")]
    Gold18kSellNote,
    #[strum(serialize = "gold14k_buy_note")]
    Gold14kBuyNote,
    #[strum(serialize = "gold14k_sell_note")]
    Gold14kSellNote,
    #[strum(serialize = "platinum_buy_note")]
    PlatinumBuyNote,
    #[strum(serialize = "platinum_sell_note")]
    PlatinumSellNote,
    #[strum(serialize = "silver_buy_note")]
    SilverBuyNote,
    #[strum(serialize = "silver_sell_note")]
    SilverSellNote,
}

impl LabelKey {
    /// Parse a `custom_texts` key.
    pub fn from_key(key: &str) -> Result<Self, GoldError> {
        Self::from_str(key).map_err(|_| GoldError::UnknownLabel(key.to_string()))
    }

    /// Built-in text for this label.
    pub fn default_text(&self) -> &'static str {
        match self {
            LabelKey::Title => "한국금거래소 시세",
            LabelKey::BuyHeader => "내가 살 때 (VAT포함)",
            LabelKey::SellHeader => "내가 팔 때 (금방금방 앱 기준)",
            LabelKey::HideText => "제품시세적용",
            LabelKey::ErrorMessage => "일시적 조회 오류",
            LabelKey::PlatinumSellNote => "(자사백금바기준)",
            LabelKey::SilverSellNote => "(자사실버바기준)",
            _ => "",
        }
    }

    /// Caption shown next to the field in the settings form.
    pub fn caption(&self) -> &'static str {
        match self {
            LabelKey::Title => "제목",
            LabelKey::BuyHeader => "살 때 헤더",
            LabelKey::SellHeader => "팔 때 헤더",
            LabelKey::HideText => "Hide 텍스트",
            LabelKey::ErrorMessage => "에러 메시지",
            LabelKey::GoldBuyNote => "순금 - 살 때 노트",
            LabelKey::GoldSellNote => "순금 - 팔 때 노트",
            LabelKey::Gold18kBuyNote => "18K금 - 살 때 노트",
            LabelKey::Gold18kSellNote => "18K금 - 팔 때 노트",
            LabelKey::Gold14kBuyNote => "14K금 - 살 때 노트",
            LabelKey::Gold14kSellNote => "14K금 - 팔 때 노트",
            LabelKey::PlatinumBuyNote => "백금 - 살 때 노트",
            LabelKey::PlatinumSellNote => "백금 - 팔 때 노트",
            LabelKey::SilverBuyNote => "은 - 살 때 노트",
            LabelKey::SilverSellNote => "은 - 팔 때 노트",
        }
    }

    /// Whether this label is a per-instrument note.
    pub fn is_note(&self) -> bool {
        !matches!(
            self,
            LabelKey::Title
                | LabelKey::BuyHeader
                | LabelKey::SellHeader
                | LabelKey::HideText
                | LabelKey::ErrorMessage
        )
    }
}

/// Label texts, always holding a value for every [`LabelKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelConfig {
    texts: BTreeMap<LabelKey, String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            texts: LabelKey::iter()
                .map(|key| (key, key.default_text().to_string()))
                .collect(),
        }
    }
}

impl LabelConfig {
    /// Text for `key`.
    pub fn get(&self, key: LabelKey) -> &str {
        self.texts.get(&key).map(String::as_str).unwrap_or_default()
    }

    /// Replace the text for `key`.
    pub fn set(&mut self, key: LabelKey, text: impl Into<String>) {
        self.texts.insert(key, text.into());
    }

    /// Iterate over every label in key order.
    pub fn iter(&self) -> impl Iterator<Item = (LabelKey, &str)> {
        self.texts.iter().map(|(key, text)| (*key, text.as_str()))
    }
}
