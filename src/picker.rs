use crate::config::{ConfigUpdate, PickerConfig};
use crate::format::format_day;
use crate::grid::{year_choices, MonthGrid, OutOfTimeError, ViewCursor};
use crate::i18n::{translate, Language, Translation, TranslationKey, Translator};
use crate::selection::{DateRange, PendingSelection, PickerState, RangeSelection, Side};
use log::debug;
use std::ops::RangeInclusive;
use time::{Date, Month};

/// The payload of a `dateRangeChange` notification: the committed range with
/// each end formatted as `DD/MM/YYYY`
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DateRangeChange {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl DateRangeChange {
    pub const CLEARED: DateRangeChange = DateRangeChange {
        from_date: None,
        to_date: None,
    };
}

impl From<DateRange> for DateRangeChange {
    fn from(range: DateRange) -> DateRangeChange {
        DateRangeChange {
            from_date: range.from.map(format_day),
            to_date: range.to.map(format_day),
        }
    }
}

/// A notification sent by a [`DateRangePicker`] to its host
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PickerEvent {
    DateRangeChange(DateRangeChange),
    LanguageChange(Language),
}

/// Receiver of a [`DateRangePicker`]'s notifications
pub trait RangeListener {
    /// Called after every apply, cancel, and reset
    fn on_date_range_change(&mut self, change: &DateRangeChange);

    /// Called after the language is switched
    fn on_language_change(&mut self, language: Language);
}

impl RangeListener for () {
    fn on_date_range_change(&mut self, _change: &DateRangeChange) {}

    fn on_language_change(&mut self, _language: Language) {}
}

/// Records every notification in order
impl RangeListener for Vec<PickerEvent> {
    fn on_date_range_change(&mut self, change: &DateRangeChange) {
        self.push(PickerEvent::DateRangeChange(change.clone()));
    }

    fn on_language_change(&mut self, language: Language) {
        self.push(PickerEvent::LanguageChange(language));
    }
}

impl<L: RangeListener + ?Sized> RangeListener for &mut L {
    fn on_date_range_change(&mut self, change: &DateRangeChange) {
        (**self).on_date_range_change(change);
    }

    fn on_language_change(&mut self, language: Language) {
        (**self).on_language_change(language);
    }
}

/// A two-calendar date range picker, independent of any rendering.
///
/// The host calls [`initialize()`](Self::initialize) with its configuration,
/// forwards user actions to the corresponding methods, and reads
/// [`calendar_days()`](Self::calendar_days) and the label methods to draw the
/// widget.  Committed changes and language switches are reported to the
/// listener `L`.
#[derive(Clone, Debug)]
pub struct DateRangePicker<L> {
    today: Date,
    config: PickerConfig,
    language: Language,
    selection: RangeSelection,
    cursor: ViewCursor,
    grid: Option<MonthGrid>,
    translator: Translator,
    listener: L,
}

impl<L: RangeListener> DateRangePicker<L> {
    /// Create a picker with the default configuration, showing the month of
    /// `today`
    pub fn new(today: Date, listener: L) -> DateRangePicker<L> {
        DateRangePicker {
            today,
            config: PickerConfig::default(),
            language: Language::default(),
            selection: RangeSelection::default(),
            cursor: ViewCursor::containing(today),
            grid: None,
            translator: translate,
            listener,
        }
    }

    /// Replace the lookup used for labels
    pub fn with_translator(mut self, translator: Translator) -> DateRangePicker<L> {
        self.translator = translator;
        self
    }

    /// Apply a complete host configuration, replacing the committed range
    /// with the configured initial dates.  Initial dates that cannot be
    /// parsed are ignored.  No notification is sent.
    pub fn initialize(&mut self, config: PickerConfig) {
        self.config = config;
        self.language = self.config.language();
        self.selection.set_bounds(self.config.bounds());
        self.load_initial_dates();
    }

    /// Apply part of a host configuration.  The committed range is only
    /// reloaded if one of the initial dates is part of the update.
    pub fn update_config(&mut self, update: ConfigUpdate) {
        let languages_changed = update.default_language.is_some() || update.host_language.is_some();
        let dates_changed = self.config.merge(update);
        if languages_changed {
            self.language = self.config.language();
        }
        self.selection.set_bounds(self.config.bounds());
        if !self.config.show_to_date && self.selection.is_open(Side::To) {
            self.selection.dismiss();
        }
        if dates_changed {
            self.load_initial_dates();
        }
    }

    fn load_initial_dates(&mut self) {
        let from = self.initial_date(Side::From);
        let to = self.initial_date(Side::To);
        self.selection.restore(DateRange::new(from, to));
        if let Some(date) = from {
            self.show_date(date);
        }
    }

    fn initial_date(&self, side: Side) -> Option<Date> {
        let value = self.config.initial_date(side)?;
        let date = value.to_date();
        if date.is_none() {
            debug!("Ignoring unparseable initial {side} date {value:?}");
        }
        date
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    // Language & labels

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn switch_language(&mut self, language: Language) {
        self.language = language;
        debug!("Switched language to {language}");
        self.listener.on_language_change(language);
    }

    /// Look up `key` in the current language
    pub fn t(&self, key: TranslationKey) -> Translation {
        (self.translator)(key, self.language)
    }

    /// Look up a single label in the current language.  Returns the empty
    /// string if `key` names a list.
    pub fn label(&self, key: TranslationKey) -> &'static str {
        self.t(key).as_text().unwrap_or_default()
    }

    pub fn month_label(&self, month: Month) -> &'static str {
        self.t(TranslationKey::Months)
            .as_list()
            .and_then(|months| months.get(usize::from(u8::from(month)) - 1))
            .copied()
            .unwrap_or_default()
    }

    pub fn weekday_labels(&self) -> &'static [&'static str] {
        self.t(TranslationKey::WeekDays)
            .as_list()
            .unwrap_or_default()
    }

    /// The caption above the field for `side`
    pub fn field_label(&self, side: Side) -> &'static str {
        self.label(match side {
            Side::From => TranslationKey::FromDate,
            Side::To => TranslationKey::ToDate,
        })
    }

    /// The text shown in the field for `side` when it has no value: the
    /// configured placeholder for the current language, falling back to the
    /// field's label
    pub fn placeholder(&self, side: Side) -> &str {
        self.config
            .placeholders
            .get(side)
            .get(self.language)
            .unwrap_or_else(|| self.field_label(side))
    }

    /// The committed value for `side`, formatted for display, or the empty
    /// string
    pub fn display_value(&self, side: Side) -> String {
        self.selection
            .committed()
            .get(side)
            .map(format_day)
            .unwrap_or_default()
    }

    pub fn show_label(&self) -> bool {
        self.config.show_label
    }

    pub fn show_to_date(&self) -> bool {
        self.config.show_to_date
    }

    // Opening & closing

    pub fn state(&self) -> PickerState {
        self.selection.state()
    }

    pub fn open_side(&self) -> Option<Side> {
        self.selection.open_side()
    }

    /// Open the calendar for `side` and move the view to its seeded date.
    /// Returns `false` if `side` is [`Side::To`] and the end date is hidden.
    pub fn open(&mut self, side: Side) -> bool {
        if side == Side::To && !self.config.show_to_date {
            return false;
        }
        self.selection.open(side);
        if let Some(date) = self.selection.pending().get(side) {
            self.show_date(date);
        }
        true
    }

    /// Open the calendar for `side`, or close it if it is already open.
    /// Returns whether it is now open.
    pub fn toggle(&mut self, side: Side) -> bool {
        if self.selection.is_open(side) {
            self.selection.dismiss();
            false
        } else {
            self.open(side)
        }
    }

    /// Close any open calendar, as when the user clicks outside the widget
    pub fn dismiss(&mut self) {
        self.selection.dismiss();
    }

    // Navigation

    pub fn cursor(&self) -> ViewCursor {
        self.cursor
    }

    pub fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        self.cursor.next_month()
    }

    pub fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        self.cursor.previous_month()
    }

    pub fn set_month(&mut self, month: Month) -> Result<(), OutOfTimeError> {
        self.cursor.set_month(month)
    }

    pub fn set_year(&mut self, year: i32) -> Result<(), OutOfTimeError> {
        self.cursor.set_year(year)
    }

    /// Move the view to the month containing `date`
    pub fn show_date(&mut self, date: Date) {
        self.cursor = ViewCursor::containing(date);
    }

    /// The years to offer for direct year selection
    pub fn year_choices(&self) -> RangeInclusive<i32> {
        year_choices(self.today)
    }

    /// The grid for the month currently in view.  The grid is cached until
    /// the view moves to another month.
    pub fn calendar_days(&mut self) -> Result<&MonthGrid, OutOfTimeError> {
        let cursor = self.cursor;
        let grid = match self.grid.take() {
            Some(grid) if grid.cursor() == cursor => grid,
            _ => cursor.grid()?,
        };
        let grid: &MonthGrid = self.grid.insert(grid);
        Ok(grid)
    }

    // Selection

    pub fn committed(&self) -> DateRange {
        self.selection.committed()
    }

    pub fn pending(&self) -> PendingSelection {
        self.selection.pending()
    }

    pub fn is_disabled(&self, side: Side, date: Date) -> bool {
        self.selection.is_disabled(side, date)
    }

    pub fn is_selectable(&self, side: Side, date: Date) -> bool {
        self.selection.is_selectable(side, date)
    }

    pub fn is_selected(&self, date: Date) -> bool {
        self.selection.is_selected(date)
    }

    /// Stage `date` for `side`.  Returns `false` if it was refused.
    pub fn select_day(&mut self, side: Side, date: Date) -> bool {
        self.selection.select_day(side, date)
    }

    /// Commit the pending value for `side` and notify the listener with the
    /// whole committed range.  Returns `false` (and sends nothing) if the
    /// calendar for `side` is not open.
    pub fn apply(&mut self, side: Side) -> bool {
        match self.selection.apply(side) {
            Some(range) => {
                self.emit(range);
                true
            }
            None => false,
        }
    }

    /// Clear `side` and notify the listener with an empty range
    pub fn cancel(&mut self, side: Side) {
        let range = self.selection.cancel(side);
        self.emit(range);
    }

    /// Clear both sides, close any calendar, and notify the listener with an
    /// empty range
    pub fn reset(&mut self) {
        let range = self.selection.reset();
        self.emit(range);
    }

    fn emit(&mut self, range: DateRange) {
        let change = DateRangeChange::from(range);
        debug!("Emitting date range change {change:?}");
        self.listener.on_date_range_change(&change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Placeholders;
    use crate::format::DateValue;
    use time::macros::date;

    fn picker() -> DateRangePicker<Vec<PickerEvent>> {
        DateRangePicker::new(date!(2024 - 06 - 15), Vec::new())
    }

    fn picker_with_range(from: &str, to: &str) -> DateRangePicker<Vec<PickerEvent>> {
        let mut p = picker();
        p.initialize(PickerConfig {
            initial_from_date: Some(from.into()),
            initial_to_date: Some(to.into()),
            ..PickerConfig::default()
        });
        p
    }

    fn change(from: Option<&str>, to: Option<&str>) -> PickerEvent {
        PickerEvent::DateRangeChange(DateRangeChange {
            from_date: from.map(String::from),
            to_date: to.map(String::from),
        })
    }

    #[test]
    fn test_initialize_parses_dates() {
        let p = picker_with_range("10/01/2024", "20/01/2024");
        assert_eq!(
            p.committed(),
            DateRange::new(Some(date!(2024 - 01 - 10)), Some(date!(2024 - 01 - 20)))
        );
        assert_eq!(p.pending(), p.committed());
        assert_eq!(p.cursor(), ViewCursor::containing(date!(2024 - 01 - 10)));
        assert_eq!(p.display_value(Side::From), "10/01/2024");
        assert!(p.listener().is_empty());
    }

    #[test]
    fn test_initialize_ignores_bad_dates() {
        let p = picker_with_range("32/01/2024", "20/01/2024");
        assert_eq!(
            p.committed(),
            DateRange::new(None, Some(date!(2024 - 01 - 20)))
        );
        assert_eq!(p.cursor(), ViewCursor::containing(date!(2024 - 06 - 15)));
        assert_eq!(p.display_value(Side::From), "");
    }

    #[test]
    fn test_initialize_accepts_date_values() {
        let mut p = picker();
        p.initialize(PickerConfig {
            initial_from_date: Some(DateValue::Date(date!(2023 - 02 - 03))),
            ..PickerConfig::default()
        });
        assert_eq!(p.committed().from, Some(date!(2023 - 02 - 03)));
        assert_eq!(p.cursor().month(), Month::February);
    }

    #[test]
    fn test_full_round() {
        let mut p = picker();
        assert!(p.open(Side::From));
        assert!(p.select_day(Side::From, date!(2024 - 06 - 03)));
        assert!(p.apply(Side::From));
        assert!(p.open(Side::To));
        assert!(p.select_day(Side::To, date!(2024 - 06 - 09)));
        assert!(p.apply(Side::To));
        assert_eq!(p.state(), PickerState::Idle);
        assert_eq!(
            p.listener(),
            &[
                change(Some("03/06/2024"), None),
                change(Some("03/06/2024"), Some("09/06/2024")),
            ]
        );
    }

    #[test]
    fn test_apply_closed_side_sends_nothing() {
        let mut p = picker();
        assert!(!p.apply(Side::From));
        assert!(p.listener().is_empty());
    }

    #[test]
    fn test_cancel_from_emits_empty_range() {
        let mut p = picker_with_range("10/01/2024", "20/01/2024");
        assert!(p.open(Side::From));
        p.cancel(Side::From);
        assert_eq!(p.listener(), &[change(None, None)]);
        assert_eq!(
            p.committed(),
            DateRange::new(None, Some(date!(2024 - 01 - 20)))
        );
        assert_eq!(p.state(), PickerState::Idle);
    }

    #[test]
    fn test_reset() {
        let mut p = picker_with_range("10/01/2024", "20/01/2024");
        assert!(p.open(Side::To));
        assert!(p.select_day(Side::To, date!(2024 - 01 - 18)));
        p.reset();
        assert_eq!(p.committed(), DateRange::EMPTY);
        assert_eq!(p.pending(), DateRange::EMPTY);
        assert_eq!(p.state(), PickerState::Idle);
        assert_eq!(p.listener(), &[change(None, None)]);
    }

    #[test]
    fn test_open_resyncs_cursor() {
        let mut p = picker_with_range("10/01/2024", "20/03/2024");
        assert_eq!(p.cursor().month(), Month::January);
        assert!(p.open(Side::To));
        assert_eq!(p.cursor().month(), Month::March);
        p.next_month().unwrap();
        assert!(p.open(Side::From));
        assert_eq!(p.cursor().month(), Month::January);
    }

    #[test]
    fn test_open_without_value_keeps_cursor() {
        let mut p = picker();
        p.previous_month().unwrap();
        assert!(p.open(Side::From));
        assert_eq!(p.cursor().month(), Month::May);
    }

    #[test]
    fn test_hidden_to_date_cannot_open() {
        let mut p = picker();
        p.initialize(PickerConfig {
            show_to_date: false,
            ..PickerConfig::default()
        });
        assert!(!p.show_to_date());
        assert!(!p.open(Side::To));
        assert!(!p.toggle(Side::To));
        assert_eq!(p.state(), PickerState::Idle);
    }

    #[test]
    fn test_toggle_and_dismiss() {
        let mut p = picker();
        assert!(p.toggle(Side::From));
        assert!(p.toggle(Side::To));
        assert_eq!(p.open_side(), Some(Side::To));
        assert!(!p.toggle(Side::To));
        assert_eq!(p.open_side(), None);
        assert!(p.toggle(Side::From));
        p.dismiss();
        assert_eq!(p.open_side(), None);
        assert!(p.listener().is_empty());
    }

    #[test]
    fn test_bounds_scenario() {
        let mut p = picker();
        p.initialize(PickerConfig {
            min_date: Some(date!(2024 - 01 - 01)),
            max_date: Some(date!(2024 - 01 - 31)),
            ..PickerConfig::default()
        });
        assert!(p.is_disabled(Side::From, date!(2023 - 12 - 31)));
        assert!(!p.is_disabled(Side::From, date!(2024 - 01 - 15)));
    }

    #[test]
    fn test_update_config_bounds_keep_range() {
        let mut p = picker_with_range("10/01/2024", "20/01/2024");
        p.update_config(ConfigUpdate {
            min_date: Some(Some(date!(2024 - 01 - 05))),
            ..ConfigUpdate::default()
        });
        assert!(p.is_disabled(Side::From, date!(2024 - 01 - 04)));
        assert_eq!(p.committed().from, Some(date!(2024 - 01 - 10)));
    }

    #[test]
    fn test_update_config_reloads_dates() {
        let mut p = picker_with_range("10/01/2024", "20/01/2024");
        p.update_config(ConfigUpdate {
            initial_from_date: Some(Some("01/02/2024".into())),
            initial_to_date: Some(None),
            ..ConfigUpdate::default()
        });
        assert_eq!(
            p.committed(),
            DateRange::new(Some(date!(2024 - 02 - 01)), None)
        );
        assert_eq!(p.cursor().month(), Month::February);
    }

    #[test]
    fn test_update_config_hiding_to_date_closes_it() {
        let mut p = picker();
        assert!(p.open(Side::To));
        p.update_config(ConfigUpdate {
            show_to_date: Some(false),
            ..ConfigUpdate::default()
        });
        assert_eq!(p.state(), PickerState::Idle);
    }

    #[test]
    fn test_language_resolution() {
        let mut p = picker();
        p.initialize(PickerConfig {
            default_language: Language::Ar,
            ..PickerConfig::default()
        });
        assert_eq!(p.language(), Language::Ar);
        p.initialize(PickerConfig {
            default_language: Language::Ar,
            host_language: Some(Language::En),
            ..PickerConfig::default()
        });
        assert_eq!(p.language(), Language::En);
    }

    #[test]
    fn test_switch_language() {
        let mut p = picker_with_range("10/01/2024", "20/01/2024");
        p.switch_language(Language::Ar);
        assert_eq!(p.language(), Language::Ar);
        assert_eq!(p.label(TranslationKey::Apply), "تطبيق");
        assert_eq!(p.month_label(Month::January), "يناير");
        assert_eq!(p.weekday_labels().len(), 7);
        assert_eq!(p.listener(), &[PickerEvent::LanguageChange(Language::Ar)]);
        assert_eq!(p.committed().to, Some(date!(2024 - 01 - 20)));
    }

    #[test]
    fn test_placeholders() {
        let mut p = picker();
        let mut placeholders = Placeholders::default();
        placeholders.from.ar = Some(String::from("البداية"));
        p.initialize(PickerConfig {
            placeholders,
            ..PickerConfig::default()
        });
        assert_eq!(p.placeholder(Side::From), "From Date");
        p.switch_language(Language::Ar);
        assert_eq!(p.placeholder(Side::From), "البداية");
        assert_eq!(p.placeholder(Side::To), "إلى التاريخ");
    }

    #[test]
    fn test_custom_translator() {
        fn shouty(key: TranslationKey, language: Language) -> Translation {
            match key {
                TranslationKey::Apply => Translation::Text("APPLY!"),
                _ => translate(key, language),
            }
        }

        let p = picker().with_translator(shouty);
        assert_eq!(p.label(TranslationKey::Apply), "APPLY!");
        assert_eq!(p.label(TranslationKey::Clear), "Clear");
        assert_eq!(p.label(TranslationKey::Months), "");
    }

    #[test]
    fn test_calendar_days_follow_cursor() {
        let mut p = picker();
        assert_eq!(
            p.calendar_days().unwrap().cursor(),
            ViewCursor::containing(date!(2024 - 06 - 01))
        );
        p.set_month(Month::February).unwrap();
        let grid = p.calendar_days().unwrap();
        assert_eq!(grid.first_date(), date!(2024 - 01 - 28));
        assert_eq!(grid.iter().filter(|d| d.current_month).count(), 29);
    }

    #[test]
    fn test_year_choices() {
        assert_eq!(picker().year_choices(), 2019..=2028);
    }

    #[test]
    fn test_borrowed_listener() {
        let mut events = Vec::new();
        let mut p = DateRangePicker::new(date!(2024 - 06 - 15), &mut events);
        p.reset();
        drop(p);
        assert_eq!(events, [change(None, None)]);
    }
}
