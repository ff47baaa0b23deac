use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

static DMY_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[day padding:none]/[month padding:none]/[year]");

/// A date as supplied by a host: either an actual date or text that may or
/// may not hold one
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DateValue {
    Date(Date),
    Text(String),
}

impl DateValue {
    /// Returns the date this value denotes, if any.  Text is parsed as
    /// `DD/MM/YYYY`.
    pub fn to_date(&self) -> Option<Date> {
        match self {
            DateValue::Date(d) => Some(*d),
            DateValue::Text(s) => parse_date(s),
        }
    }
}

impl From<Date> for DateValue {
    fn from(date: Date) -> DateValue {
        DateValue::Date(date)
    }
}

impl From<String> for DateValue {
    fn from(s: String) -> DateValue {
        DateValue::Text(s)
    }
}

impl From<&str> for DateValue {
    fn from(s: &str) -> DateValue {
        DateValue::Text(s.to_owned())
    }
}

/// Render a date as zero-padded `DD/MM/YYYY`
pub fn format_day(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

/// Render an optional host-supplied date for display.
///
/// Nothing renders as the empty string, text is passed through as-is (it is
/// assumed to be formatted already), and dates are rendered with
/// [`format_day()`].
pub fn format_date(value: Option<&DateValue>) -> String {
    match value {
        None => String::new(),
        Some(DateValue::Text(s)) => s.clone(),
        Some(DateValue::Date(d)) => format_day(*d),
    }
}

/// Parse a `DD/MM/YYYY` string.  The day and month may be given without a
/// leading zero.  Malformed input and impossible dates like `31/02/2024` both
/// yield `None`.
pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s.trim(), &DMY_FMT).ok()
}
