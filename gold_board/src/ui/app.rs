//! UI-loop state: the board, the live settings, and key handling.
//!
//! Every mutation of display state happens here on the UI loop. Visibility toggles and
//! settings saves are persisted immediately and re-render the latest quotes.
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gold_common::BoardEvent;
use gold_common::instrument::{Instrument, Side};
use gold_common::settings::{Settings, SettingsStore};
use log::{debug, info};

use crate::model::display::Board;
use crate::model::settings_form::SettingsForm;
use crate::poller::TimingHandle;

/// Everything the renderer draws from.
pub struct App {
    /// Display state.
    pub board: Board,
    /// Live settings.
    pub settings: Settings,
    /// Open settings dialog, if any.
    pub form: Option<SettingsForm>,
    store: SettingsStore,
    timing: TimingHandle,
    quit: bool,
}

impl App {
    /// Build the app around loaded settings.
    pub fn new(settings: Settings, store: SettingsStore, timing: TimingHandle) -> Self {
        Self {
            board: Board::new(&settings),
            settings,
            form: None,
            store,
            timing,
            quit: false,
        }
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply a worker event.
    pub fn handle_event(&mut self, event: BoardEvent, now: Instant) {
        debug!("Applying {}", event.kind());
        self.board.apply(event, &self.settings, now);
    }

    /// Advance animations.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.board.tick(now)
    }

    /// Route a key press to the dialog or the board.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        if self.form.is_some() {
            self.handle_form_key(key, now);
        } else {
            self.handle_board_key(key, now);
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc if self.board.ui.admin_mode => self.toggle_admin(),
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('a') => self.toggle_admin(),
            _ if !self.board.ui.admin_mode => {}
            KeyCode::Up | KeyCode::Char('k') => self.board.ui.selection.prev_instrument(),
            KeyCode::Down | KeyCode::Char('j') => self.board.ui.selection.next_instrument(),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => self.board.ui.selection.switch_side(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let selection = self.board.ui.selection;
                self.toggle_visibility(selection.instrument, selection.side, now);
            }
            KeyCode::Char('s') => self.open_settings(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => return self.cancel_settings(),
            KeyCode::Enter => return self.save_settings(now),
            _ => {}
        }
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('r') if ctrl => form.reset_to_defaults(),
            KeyCode::F(5) => form.reset_to_defaults(),
            KeyCode::Up | KeyCode::BackTab => form.select_prev(),
            KeyCode::Down | KeyCode::Tab => form.select_next(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) if !ctrl => form.insert_char(c),
            _ => {}
        }
    }

    /// Show or hide the hide controls and the settings entry.
    pub fn toggle_admin(&mut self) {
        self.board.ui.admin_mode = !self.board.ui.admin_mode;
        debug!("Admin mode: {}", self.board.ui.admin_mode);
    }

    /// Flip one side's visibility, persist it and re-render right away.
    pub fn toggle_visibility(&mut self, instrument: Instrument, side: Side, now: Instant) {
        let hidden = self.settings.visibility.toggle(instrument, side);
        info!("{} {} is now {}", instrument, side, if hidden { "hidden" } else { "shown" });
        self.store.save_or_log(&self.settings);
        self.board.render(&self.settings, now);
    }

    /// Open the settings dialog pre-filled from the live settings.
    pub fn open_settings(&mut self) {
        self.form = Some(SettingsForm::open(&self.settings));
    }

    /// Close the dialog without applying anything.
    pub fn cancel_settings(&mut self) {
        self.form = None;
    }

    /// Apply the dialog, persist, publish timing to the worker and re-render.
    pub fn save_settings(&mut self, now: Instant) {
        let Some(form) = self.form.take() else {
            return;
        };
        form.commit(&mut self.settings);
        self.timing.store(self.settings.timing);
        self.store.save_or_log(&self.settings);
        info!(
            "Settings saved: interval {}s, error timeout {}m",
            self.settings.timing.update_interval, self.settings.timing.error_timeout
        );
        self.board.render(&self.settings, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gold_common::labels::LabelKey;
    use gold_common::quote::{InstrumentQuote, Quote, QuoteBook};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn temp_path(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("gold_board_app_{}_{}_{}.json", std::process::id(), n, name))
    }

    fn make_app(name: &str) -> (App, SettingsStore, TimingHandle) {
        let store = SettingsStore::new(temp_path(name));
        let settings = store.load();
        let timing = TimingHandle::new(settings.timing);
        (App::new(settings, store.clone(), timing.clone()), store, timing)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
    }

    fn book() -> QuoteBook {
        let mut book = QuoteBook::default();
        let quote = Quote {
            price: 450_000,
            change_rate: "0.1".into(),
            change_amount: 500,
        };
        for instrument in Instrument::all() {
            book.insert(
                instrument,
                InstrumentQuote {
                    buy: quote.clone(),
                    sell: quote.clone(),
                },
            );
        }
        book
    }

    #[test]
    fn hide_controls_need_admin_mode() {
        let (mut app, store, _) = make_app("admin");
        press(&mut app, KeyCode::Enter);
        assert!(!app.settings.visibility.is_hidden(Instrument::Gold24k, Side::Buy));

        press(&mut app, KeyCode::Char('a'));
        assert!(app.board.ui.admin_mode);
        press(&mut app, KeyCode::Enter);
        assert!(app.settings.visibility.is_hidden(Instrument::Gold24k, Side::Buy));
        assert_eq!(store.load(), app.settings);

        press(&mut app, KeyCode::Esc);
        assert!(!app.board.ui.admin_mode);
        assert!(!app.should_quit());
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn toggle_replaces_price_immediately() {
        let (mut app, store, _) = make_app("toggle");
        app.handle_event(
            BoardEvent::PricesUpdated {
                book: book(),
                fetched_at: chrono::Local::now(),
            },
            Instant::now(),
        );
        app.toggle_visibility(Instrument::Silver, Side::Sell, Instant::now());
        let silver = app.board.card(Instrument::Silver).unwrap();
        assert_eq!(silver.sell.price_text, "제품시세적용");
        assert!(silver.sell.change_text.is_empty());
        assert!(silver.sell.note.is_none());
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn settings_dialog_saves_and_publishes_timing() {
        let (mut app, store, timing) = make_app("dialog");
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('s'));
        assert!(app.form.is_some());

        // Title row is selected first.
        press(&mut app, KeyCode::Char('!'));
        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Enter);

        assert!(app.form.is_none());
        assert_eq!(app.settings.labels.get(LabelKey::Title), "한국금거래소 시세!");
        assert_eq!(app.settings.timing.update_interval, 30);
        assert_eq!(timing.load().update_interval, 30);
        assert_eq!(store.load().timing.update_interval, 30);
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn cancel_discards_edits() {
        let (mut app, store, _) = make_app("cancel");
        app.open_settings();
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);
        assert!(app.form.is_none());
        assert_eq!(app.settings.labels.get(LabelKey::Title), "한국금거래소 시세");
        assert!(!store.path().exists());
    }

    #[test]
    fn reset_in_dialog_restores_defaults_on_save() {
        let (mut app, store, _) = make_app("reset");
        app.settings.labels.set(LabelKey::Title, "Custom");
        app.open_settings();
        app.handle_key(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.settings.labels.get(LabelKey::Title), "한국금거래소 시세");
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn quit_keys() {
        let (mut app, _, _) = make_app("quit");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let (mut app, _, _) = make_app("quit_ctrl_c");
        app.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(app.should_quit());
    }
}
