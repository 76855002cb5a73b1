//! Editable copy of labels and timing behind the settings dialog.
//!
//! Values are kept as raw text while editing; validation happens on save, where a
//! non-numeric or < 1 interval/timeout silently becomes the default.

use gold_common::labels::LabelKey;
use gold_common::settings::{
    DEFAULT_ERROR_TIMEOUT, DEFAULT_UPDATE_INTERVAL, Settings, TimingConfig,
};
use strum::IntoEnumIterator;

/// What a form row edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    /// A label text.
    Label(LabelKey),
    /// Poll interval in seconds.
    UpdateInterval,
    /// Error timeout in minutes.
    ErrorTimeout,
}

impl FieldKey {
    /// Caption shown in front of the value.
    pub fn caption(&self) -> &'static str {
        match self {
            FieldKey::Label(key) => key.caption(),
            FieldKey::UpdateInterval => "업데이트 간격 (초)",
            FieldKey::ErrorTimeout => "API 에러 타임아웃 (분)",
        }
    }

    fn default_value(&self) -> String {
        match self {
            FieldKey::Label(key) => key.default_text().to_string(),
            FieldKey::UpdateInterval => DEFAULT_UPDATE_INTERVAL.to_string(),
            FieldKey::ErrorTimeout => DEFAULT_ERROR_TIMEOUT.to_string(),
        }
    }
}

/// One editable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// What the row edits.
    pub key: FieldKey,
    /// Current text.
    pub value: String,
}

/// State of the open settings dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    fields: Vec<FormField>,
    selected: usize,
}

impl SettingsForm {
    /// Open the form pre-filled from `settings`.
    ///
    /// Rows: general labels, then timing, then the per-instrument notes.
    pub fn open(settings: &Settings) -> Self {
        let (notes, general): (Vec<LabelKey>, Vec<LabelKey>) =
            LabelKey::iter().partition(LabelKey::is_note);
        let label_field = |key: LabelKey| FormField {
            key: FieldKey::Label(key),
            value: settings.labels.get(key).to_string(),
        };

        let mut fields: Vec<FormField> = general.into_iter().map(label_field).collect();
        fields.push(FormField {
            key: FieldKey::UpdateInterval,
            value: settings.timing.update_interval.to_string(),
        });
        fields.push(FormField {
            key: FieldKey::ErrorTimeout,
            value: settings.timing.error_timeout.to_string(),
        });
        fields.extend(notes.into_iter().map(label_field));

        Self {
            fields,
            selected: 0,
        }
    }

    /// All rows in display order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Index of the row being edited.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Whether a separator belongs above row `idx` (between timing and notes).
    pub fn separator_before(&self, idx: usize) -> bool {
        idx > 0 && matches!(self.fields[idx - 1].key, FieldKey::ErrorTimeout)
    }

    /// Select the next row, wrapping around.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.fields.len();
    }

    /// Select the previous row, wrapping around.
    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.fields.len() - 1) % self.fields.len();
    }

    /// Append a character to the selected row.
    pub fn insert_char(&mut self, c: char) {
        self.fields[self.selected].value.push(c);
    }

    /// Delete the last character of the selected row.
    pub fn backspace(&mut self) {
        self.fields[self.selected].value.pop();
    }

    /// Put every row back to its built-in default. Nothing is saved until `commit`.
    pub fn reset_to_defaults(&mut self) {
        for field in &mut self.fields {
            field.value = field.key.default_value();
        }
    }

    /// Write the form into `settings`, validating the timing rows.
    pub fn commit(&self, settings: &mut Settings) {
        for field in &self.fields {
            match field.key {
                FieldKey::Label(key) => settings.labels.set(key, field.value.clone()),
                FieldKey::UpdateInterval => {
                    settings.timing.update_interval = TimingConfig::parse_interval(&field.value)
                }
                FieldKey::ErrorTimeout => {
                    settings.timing.error_timeout = TimingConfig::parse_timeout(&field.value)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(form: &mut SettingsForm, key: FieldKey) {
        while form.fields()[form.selected()].key != key {
            form.select_next();
        }
    }

    #[test]
    fn rows_follow_dialog_order() {
        let form = SettingsForm::open(&Settings::default());
        let keys: Vec<FieldKey> = form.fields().iter().map(|f| f.key).collect();
        assert_eq!(keys.len(), 17);
        assert_eq!(keys[0], FieldKey::Label(LabelKey::Title));
        assert_eq!(keys[4], FieldKey::Label(LabelKey::ErrorMessage));
        assert_eq!(keys[5], FieldKey::UpdateInterval);
        assert_eq!(keys[6], FieldKey::ErrorTimeout);
        assert_eq!(keys[7], FieldKey::Label(LabelKey::GoldBuyNote));
        assert!(form.separator_before(7));
        assert!(!form.separator_before(6));
    }

    #[test]
    fn edits_commit_into_settings() {
        let mut settings = Settings::default();
        let mut form = SettingsForm::open(&settings);
        select(&mut form, FieldKey::Label(LabelKey::Title));
        for _ in 0.."한국금거래소 시세".chars().count() {
            form.backspace();
        }
        "Gold".chars().for_each(|c| form.insert_char(c));
        select(&mut form, FieldKey::UpdateInterval);
        form.backspace();
        form.backspace();
        form.insert_char('5');
        form.commit(&mut settings);

        assert_eq!(settings.labels.get(LabelKey::Title), "Gold");
        assert_eq!(settings.timing.update_interval, 5);
        assert_eq!(settings.timing.error_timeout, DEFAULT_ERROR_TIMEOUT);
    }

    #[test]
    fn invalid_timing_falls_back_to_defaults() {
        let mut settings = Settings::default();
        settings.timing = TimingConfig {
            update_interval: 60,
            error_timeout: 10,
        };
        let mut form = SettingsForm::open(&settings);
        select(&mut form, FieldKey::UpdateInterval);
        form.insert_char('x');
        select(&mut form, FieldKey::ErrorTimeout);
        form.backspace();
        form.backspace();
        form.insert_char('0');
        form.commit(&mut settings);

        assert_eq!(settings.timing, TimingConfig::default());
    }

    #[test]
    fn reset_restores_defaults_without_saving() {
        let mut settings = Settings::default();
        settings.labels.set(LabelKey::HideText, "숨김");
        settings.timing.update_interval = 42;
        let mut form = SettingsForm::open(&settings);
        form.reset_to_defaults();
        assert_eq!(settings.labels.get(LabelKey::HideText), "숨김");

        form.commit(&mut settings);
        assert_eq!(settings.labels.get(LabelKey::HideText), "제품시세적용");
        assert_eq!(settings.timing.update_interval, DEFAULT_UPDATE_INTERVAL);
    }

    #[test]
    fn selection_wraps() {
        let mut form = SettingsForm::open(&Settings::default());
        form.select_prev();
        assert_eq!(form.selected(), form.fields().len() - 1);
        form.select_next();
        assert_eq!(form.selected(), 0);
    }
}
