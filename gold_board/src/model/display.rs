//! Display state: one explicit record per card and the board that applies worker events.
//!
//! The board holds what is currently on screen for every instrument/side, the latest
//! quotes (so visibility and label changes can re-render without waiting for a poll) and
//! the small UI-state record for admin mode and the selected hide control.

use std::time::Instant;

use chrono::{DateTime, Local};
use gold_common::BoardEvent;
use gold_common::format::{Direction, format_price, quote_change};
use gold_common::instrument::{Instrument, Side};
use gold_common::labels::LabelKey;
use gold_common::quote::{Quote, QuoteBook};
use gold_common::settings::Settings;
use log::{debug, info};
use strum::IntoEnumIterator;

use crate::model::animator::CountUp;

/// Timestamp format of the last-update indicator.
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Color token for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Regular text.
    Normal,
    /// Rising change.
    Up,
    /// Falling change.
    Down,
    /// Persistent fetch error.
    Error,
    /// Hide text and secondary captions.
    Muted,
}

impl From<Direction> for Tone {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Tone::Up,
            Direction::Down => Tone::Down,
        }
    }
}

/// What one side of one card shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SideView {
    /// Price line.
    pub price_text: String,
    /// Price line color.
    pub price_tone: Tone,
    /// Change indicator line; empty when cleared.
    pub change_text: String,
    /// Change indicator color.
    pub change_tone: Tone,
    /// Note under the price, when configured and visible.
    pub note: Option<String>,
    /// Whether the hide text replaces the price.
    pub hidden: bool,
    /// Last applied quote price, where the next count-up starts. The hide text resets it;
    /// the error message keeps it.
    previous_price: u64,
    animation: Option<CountUp>,
}

impl SideView {
    fn new(hidden: bool, note: &str, hide_text: &str) -> Self {
        let mut view = Self {
            price_text: format_price(0),
            price_tone: Tone::Normal,
            change_text: String::new(),
            change_tone: Tone::Normal,
            note: None,
            hidden,
            previous_price: 0,
            animation: None,
        };
        if hidden {
            view.show_hidden(hide_text);
        } else {
            view.set_note(note);
        }
        view
    }

    /// Caption of the hide control.
    pub fn toggle_label(&self) -> &'static str {
        if self.hidden { "Show" } else { "Hide" }
    }

    /// Whether a count-up is still running.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn show_hidden(&mut self, hide_text: &str) {
        self.price_text = hide_text.to_string();
        self.price_tone = Tone::Muted;
        self.change_text.clear();
        self.note = None;
        self.previous_price = 0;
        self.animation = None;
    }

    fn show_error(&mut self, message: &str) {
        self.price_text = message.to_string();
        self.price_tone = Tone::Error;
        self.change_text.clear();
        self.animation = None;
    }

    fn show_quote(&mut self, quote: &Quote, now: Instant) {
        self.animate_to(quote.price, now);
        let change = quote_change(quote);
        self.change_text = change.text;
        self.change_tone = change.direction.into();
    }

    fn animate_to(&mut self, price: u64, now: Instant) {
        self.price_tone = Tone::Normal;
        if price == 0 {
            self.price_text = format_price(0);
            self.animation = None;
        } else {
            let mut animation = CountUp::begin(self.previous_price, price, now);
            if let Some(frame) = animation.advance(now) {
                self.price_text = format_price(frame);
            }
            self.animation = Some(animation);
        }
        self.previous_price = price;
    }

    fn set_note(&mut self, note: &str) {
        self.note = (!note.is_empty()).then(|| note.to_string());
    }

    fn tick(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        let mut frame = None;
        while let Some(value) = animation.advance(now) {
            frame = Some(value);
        }
        if animation.is_finished() {
            self.animation = None;
        }
        match frame {
            Some(value) => {
                self.price_text = format_price(value);
                true
            }
            None => false,
        }
    }

    fn next_due(&self) -> Option<Instant> {
        self.animation.as_ref().and_then(CountUp::next_due)
    }
}

/// Display record for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Instrument shown on this card.
    pub instrument: Instrument,
    /// Customer buy column.
    pub buy: SideView,
    /// Customer sell column.
    pub sell: SideView,
}

impl Card {
    /// View for `side`.
    pub fn side(&self, side: Side) -> &SideView {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideView {
        match side {
            Side::Buy => &mut self.buy,
            Side::Sell => &mut self.sell,
        }
    }

    fn views_mut(&mut self) -> [&mut SideView; 2] {
        [&mut self.buy, &mut self.sell]
    }
}

/// Hide control currently selected in admin mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Selected card.
    pub instrument: Instrument,
    /// Selected column.
    pub side: Side,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            instrument: Instrument::Gold24k,
            side: Side::Buy,
        }
    }
}

impl Selection {
    /// Move to the next card, wrapping around.
    pub fn next_instrument(&mut self) {
        let all: Vec<Instrument> = Instrument::all().collect();
        let idx = all.iter().position(|i| *i == self.instrument).unwrap_or(0);
        self.instrument = all[(idx + 1) % all.len()];
    }

    /// Move to the previous card, wrapping around.
    pub fn prev_instrument(&mut self) {
        let all: Vec<Instrument> = Instrument::all().collect();
        let idx = all.iter().position(|i| *i == self.instrument).unwrap_or(0);
        self.instrument = all[(idx + all.len() - 1) % all.len()];
    }

    /// Switch between the buy and sell columns.
    pub fn switch_side(&mut self) {
        self.side = match self.side {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        };
    }
}

/// Admin mode and selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    /// Hide controls and the settings entry are visible.
    pub admin_mode: bool,
    /// Selected hide control.
    pub selection: Selection,
}

/// Everything the renderer needs, updated only from the UI loop.
#[derive(Debug, Clone)]
pub struct Board {
    cards: Vec<Card>,
    latest: Option<QuoteBook>,
    last_update: Option<DateTime<Local>>,
    countdown: Option<u64>,
    persistent_error: bool,
    /// Admin mode and selection.
    pub ui: UiState,
}

impl Board {
    /// Empty board laid out for `settings`.
    pub fn new(settings: &Settings) -> Self {
        let hide_text = settings.labels.get(LabelKey::HideText);
        let cards = Instrument::all()
            .map(|instrument| {
                let view = |side| {
                    SideView::new(
                        settings.visibility.is_hidden(instrument, side),
                        settings.labels.get(instrument.note_key(side)),
                        hide_text,
                    )
                };
                Card {
                    instrument,
                    buy: view(Side::Buy),
                    sell: view(Side::Sell),
                }
            })
            .collect();
        Self {
            cards,
            latest: None,
            last_update: None,
            countdown: Some(settings.timing.update_interval),
            persistent_error: false,
            ui: UiState::default(),
        }
    }

    /// Apply one worker event.
    pub fn apply(&mut self, event: BoardEvent, settings: &Settings, now: Instant) {
        match event {
            BoardEvent::PricesUpdated { book, fetched_at } => {
                if self.persistent_error {
                    info!("Prices available again, leaving error state");
                }
                self.persistent_error = false;
                self.last_update = Some(fetched_at);
                self.latest = Some(book);
                self.render(settings, now);
            }
            BoardEvent::FetchFailed { persistent: true } => {
                if !self.persistent_error {
                    info!("No successful fetch within the error timeout, showing error state");
                }
                self.persistent_error = true;
                self.render(settings, now);
            }
            BoardEvent::FetchFailed { persistent: false } => {
                debug!("Transient fetch failure, keeping current display");
            }
            BoardEvent::CountdownTick(remaining) => {
                self.countdown = Some(remaining);
            }
        }
    }

    /// Re-render the latest state after a visibility or label change.
    pub fn render(&mut self, settings: &Settings, now: Instant) {
        if self.persistent_error {
            let message = settings.labels.get(LabelKey::ErrorMessage);
            for card in &mut self.cards {
                let instrument = card.instrument;
                for (side, view) in Side::iter().zip(card.views_mut()) {
                    view.hidden = settings.visibility.is_hidden(instrument, side);
                    view.show_error(message);
                }
            }
            return;
        }

        let hide_text = settings.labels.get(LabelKey::HideText);
        let book = self.latest.as_ref();
        for card in &mut self.cards {
            let quote = book.and_then(|book| book.get(card.instrument));
            if book.is_some() && quote.is_none() {
                continue;
            }
            for side in Side::iter() {
                let instrument = card.instrument;
                let view = card.side_mut(side);
                let was_hidden = view.hidden;
                view.hidden = settings.visibility.is_hidden(instrument, side);
                if view.hidden {
                    view.show_hidden(hide_text);
                    continue;
                }
                if let Some(quote) = quote {
                    view.show_quote(quote.side(side), now);
                } else if was_hidden {
                    view.price_text = format_price(0);
                    view.price_tone = Tone::Normal;
                }
                view.set_note(settings.labels.get(instrument.note_key(side)));
            }
        }
    }

    /// Advance running animations; returns whether any text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for card in &mut self.cards {
            for view in card.views_mut() {
                changed |= view.tick(now);
            }
        }
        changed
    }

    /// Earliest pending animation frame.
    pub fn next_frame_due(&self) -> Option<Instant> {
        self.cards
            .iter()
            .flat_map(|card| [card.buy.next_due(), card.sell.next_due()])
            .flatten()
            .min()
    }

    /// Cards in display order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card for `instrument`.
    pub fn card(&self, instrument: Instrument) -> Option<&Card> {
        self.cards.iter().find(|card| card.instrument == instrument)
    }

    /// Whether the uniform error message is showing.
    pub fn is_persistent_error(&self) -> bool {
        self.persistent_error
    }

    /// Most recent quotes, if any fetch has succeeded.
    pub fn latest(&self) -> Option<&QuoteBook> {
        self.latest.as_ref()
    }

    /// Last successful fetch time, formatted; empty before the first success.
    pub fn last_update_text(&self) -> String {
        self.last_update
            .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Countdown indicator; starts at the configured interval.
    pub fn countdown_text(&self) -> String {
        self.countdown
            .map(|remaining| format!("🔄 {}", remaining))
            .unwrap_or_default()
    }
}
