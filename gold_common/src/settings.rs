//! Persisted user settings: visibility, label overrides and timing.
//!
//! The file is JSON with the shape
//!
//! ```json
//! {
//!   "hidden_buy": ["Gold18k-3.75g"],
//!   "hidden_sell": [],
//!   "custom_texts": { "title": "..." },
//!   "update_interval": 10,
//!   "error_timeout": 3
//! }
//! ```
//!
//! Loading never fails from the caller's point of view: a missing or unreadable file
//! yields the defaults, and a partial file is merged field by field over them.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::GoldError;
use crate::instrument::{Instrument, Side};
use crate::labels::{LabelConfig, LabelKey};

/// Default settings file name, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";
/// Default poll interval in seconds.
pub const DEFAULT_UPDATE_INTERVAL: u64 = 10;
/// Default staleness threshold in minutes.
pub const DEFAULT_ERROR_TIMEOUT: u64 = 3;

/// Poll cadence and staleness threshold. Both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Seconds between fetches.
    pub update_interval: u64,
    /// Minutes without a successful fetch before the error state is shown.
    pub error_timeout: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            error_timeout: DEFAULT_ERROR_TIMEOUT,
        }
    }
}

impl TimingConfig {
    /// Poll interval as a duration.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.update_interval)
    }

    /// Staleness threshold as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.error_timeout * 60)
    }

    /// Parse form input for the interval; non-numeric or < 1 gives the default.
    pub fn parse_interval(input: &str) -> u64 {
        parse_at_least_one(input, DEFAULT_UPDATE_INTERVAL)
    }

    /// Parse form input for the timeout; non-numeric or < 1 gives the default.
    pub fn parse_timeout(input: &str) -> u64 {
        parse_at_least_one(input, DEFAULT_ERROR_TIMEOUT)
    }
}

fn parse_at_least_one(input: &str, default: u64) -> u64 {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .map(|value| at_least_one(value, default))
        .unwrap_or(default)
}

fn at_least_one(value: i64, default: u64) -> u64 {
    if value < 1 { default } else { value as u64 }
}

/// Which instrument sides are replaced by the hide text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    buy: BTreeSet<Instrument>,
    sell: BTreeSet<Instrument>,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            buy: BTreeSet::from([Instrument::Gold18k, Instrument::Gold14k]),
            sell: BTreeSet::new(),
        }
    }
}

impl Visibility {
    /// Whether `instrument` is hidden on `side`.
    pub fn is_hidden(&self, instrument: Instrument, side: Side) -> bool {
        self.hidden(side).contains(&instrument)
    }

    /// Flip the hidden flag and return the new state.
    pub fn toggle(&mut self, instrument: Instrument, side: Side) -> bool {
        let set = self.hidden_mut(side);
        if set.remove(&instrument) {
            false
        } else {
            set.insert(instrument);
            true
        }
    }

    /// Hidden instruments on `side`.
    pub fn hidden(&self, side: Side) -> &BTreeSet<Instrument> {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }

    fn hidden_mut(&mut self, side: Side) -> &mut BTreeSet<Instrument> {
        match side {
            Side::Buy => &mut self.buy,
            Side::Sell => &mut self.sell,
        }
    }
}

/// Complete in-memory configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Hidden instrument sides.
    pub visibility: Visibility,
    /// Label texts.
    pub labels: LabelConfig,
    /// Poll cadence and staleness threshold.
    pub timing: TimingConfig,
}

#[derive(Debug, Serialize)]
struct SettingsFileOut<'a> {
    hidden_buy: Vec<String>,
    hidden_sell: Vec<String>,
    custom_texts: BTreeMap<String, &'a str>,
    update_interval: u64,
    error_timeout: u64,
}

impl Settings {
    /// Parse a settings document and merge it over the defaults.
    ///
    /// Only a document that is not JSON, or not an object, is an error. Each field is
    /// merged on its own; a field of the wrong type keeps its default.
    pub fn from_json(text: &str) -> Result<Self, GoldError> {
        let document: Value = serde_json::from_str(text)?;
        let fields = document
            .as_object()
            .ok_or_else(|| GoldError::Format("settings document is not an object".to_string()))?;
        Ok(Self::default().merged(fields))
    }

    /// Serialize into the settings document format.
    pub fn to_json(&self) -> Result<String, GoldError> {
        let keys = |side| {
            self.visibility
                .hidden(side)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        };
        let out = SettingsFileOut {
            hidden_buy: keys(Side::Buy),
            hidden_sell: keys(Side::Sell),
            custom_texts: self
                .labels
                .iter()
                .map(|(key, text)| (key.to_string(), text))
                .collect(),
            update_interval: self.timing.update_interval,
            error_timeout: self.timing.error_timeout,
        };
        Ok(serde_json::to_string_pretty(&out)?)
    }

    fn merged(mut self, fields: &Map<String, Value>) -> Self {
        let hidden_buy = fields.get("hidden_buy");
        if let Some(set) = hidden_buy.and_then(|value| parse_instruments("hidden_buy", value)) {
            self.visibility.buy = set;
        }
        let hidden_sell = fields.get("hidden_sell");
        if let Some(set) = hidden_sell.and_then(|value| parse_instruments("hidden_sell", value)) {
            self.visibility.sell = set;
        }
        match fields.get("custom_texts") {
            Some(Value::Object(texts)) => {
                for (key, text) in texts {
                    match (LabelKey::from_key(key), text.as_str()) {
                        (Ok(label), Some(text)) => self.labels.set(label, text),
                        (Ok(label), None) => warn!("Ignoring custom text {}: not a string", label),
                        (Err(e), _) => debug!("Ignoring custom text: {}", e),
                    }
                }
            }
            Some(other) => warn!("Ignoring custom_texts: expected an object, got {}", other),
            None => {}
        }
        if let Some(value) = fields.get("update_interval") {
            match whole_number(value) {
                Some(n) => self.timing.update_interval = at_least_one(n, DEFAULT_UPDATE_INTERVAL),
                None => warn!("Ignoring update_interval: {} is not a whole number", value),
            }
        }
        if let Some(value) = fields.get("error_timeout") {
            match whole_number(value) {
                Some(n) => self.timing.error_timeout = at_least_one(n, DEFAULT_ERROR_TIMEOUT),
                None => warn!("Ignoring error_timeout: {} is not a whole number", value),
            }
        }
        self
    }
}

/// `30` and `30.0` both read as 30; fractions, strings and nulls do not.
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn parse_instruments(field: &str, value: &Value) -> Option<BTreeSet<Instrument>> {
    let Some(keys) = value.as_array() else {
        warn!("Ignoring {}: expected a list, got {}", field, value);
        return None;
    };
    let set = keys
        .iter()
        .filter_map(|key| match key.as_str().map(Instrument::from_key) {
            Some(Ok(instrument)) => Some(instrument),
            Some(Err(e)) => {
                warn!("Ignoring {} entry: {}", field, e);
                None
            }
            None => {
                warn!("Ignoring {} entry {}: not a string", field, key);
                None
            }
        })
        .collect();
    Some(set)
}

/// Reads and writes [`Settings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(DEFAULT_SETTINGS_FILE)
    }
}

impl SettingsStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load, falling back to defaults on any failure.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Using default settings, {} could not be read: {}", self.path.display(), e);
                Settings::default()
            }
        }
    }

    /// Load, reporting read and parse failures. A missing file is not a failure.
    pub fn try_load(&self) -> Result<Settings, GoldError> {
        if !self.path.is_file() {
            info!("No settings file at {}, using defaults", self.path.display());
            return Ok(Settings::default());
        }
        let text = fs::read_to_string(&self.path)?;
        Settings::from_json(&text)
    }

    /// Write `settings` to the backing file.
    pub fn save(&self, settings: &Settings) -> Result<(), GoldError> {
        let json = settings.to_json()?;
        fs::write(&self.path, json)?;
        debug!("Settings saved to {}", self.path.display());
        Ok(())
    }

    /// Write `settings`, logging instead of returning a failure.
    pub fn save_or_log(&self, settings: &Settings) {
        if let Err(e) = self.save(settings) {
            error!("Failed to save settings to {}: {}", self.path.display(), e);
        }
    }
}
