//! A headless two-calendar date range picker.
//!
//! [`DateRangePicker`] holds a committed range plus a pending buffer that
//! days are staged into while a calendar is open; staged days only become
//! part of the committed range on apply.  Calendars are laid out as fixed
//! five-week [`MonthGrid`]s, and labels are available in English and Arabic.
//! Drawing the widget is left to the host.
mod config;
mod format;
mod grid;
mod i18n;
mod picker;
mod selection;
pub use crate::config::{ConfigError, ConfigUpdate, LocalizedText, PickerConfig, Placeholders};
pub use crate::format::{format_date, format_day, parse_date, DateValue};
pub use crate::grid::{
    year_choices, CalendarDay, MonthGrid, OutOfTimeError, ViewCursor, DAYS_IN_WEEK, GRID_CELLS,
};
pub use crate::i18n::{
    month_name, translate, weekday_names, Language, ParseLanguageError, Translation,
    TranslationKey, Translator, UnknownKeyError,
};
pub use crate::picker::{DateRangeChange, DateRangePicker, PickerEvent, RangeListener};
pub use crate::selection::{
    Bounds, DateRange, PendingSelection, PickerState, RangeSelection, Side,
};
