use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Month;

/// A language the picker has labels for
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    /// The two-letter tag for the language
    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// The language a two-language toggle switches to
    pub fn other(self) -> Language {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Language::Ar
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Language, ParseLanguageError> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLanguageError(s.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unsupported language {0:?}; expected \"en\" or \"ar\"")]
pub struct ParseLanguageError(String);

/// The labels and lists the picker displays
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TranslationKey {
    FromDate,
    ToDate,
    From,
    To,
    Apply,
    Clear,
    /// The twelve month names, January first
    Months,
    /// The seven short weekday names, Sunday first
    WeekDays,
}

impl TranslationKey {
    pub const ALL: [TranslationKey; 8] = [
        TranslationKey::FromDate,
        TranslationKey::ToDate,
        TranslationKey::From,
        TranslationKey::To,
        TranslationKey::Apply,
        TranslationKey::Clear,
        TranslationKey::Months,
        TranslationKey::WeekDays,
    ];

    /// The key's name as used by host translation tables
    pub fn as_str(self) -> &'static str {
        match self {
            TranslationKey::FromDate => "fromDate",
            TranslationKey::ToDate => "toDate",
            TranslationKey::From => "from",
            TranslationKey::To => "to",
            TranslationKey::Apply => "apply",
            TranslationKey::Clear => "clear",
            TranslationKey::Months => "months",
            TranslationKey::WeekDays => "weekDays",
        }
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationKey {
    type Err = UnknownKeyError;

    fn from_str(s: &str) -> Result<TranslationKey, UnknownKeyError> {
        TranslationKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownKeyError(s.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("no translation key named {0:?}")]
pub struct UnknownKeyError(String);

/// The result of looking up a [`TranslationKey`]: either a single label or an
/// ordered list of names
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Translation {
    Text(&'static str),
    List(&'static [&'static str]),
}

impl Translation {
    pub fn as_text(self) -> Option<&'static str> {
        match self {
            Translation::Text(s) => Some(s),
            Translation::List(_) => None,
        }
    }

    pub fn as_list(self) -> Option<&'static [&'static str]> {
        match self {
            Translation::Text(_) => None,
            Translation::List(items) => Some(items),
        }
    }
}

/// A key/language lookup function.  [`translate()`] is the built-in one.
pub type Translator = fn(TranslationKey, Language) -> Translation;

#[derive(Debug)]
struct Table {
    from_date: &'static str,
    to_date: &'static str,
    from: &'static str,
    to: &'static str,
    apply: &'static str,
    clear: &'static str,
    months: [&'static str; 12],
    week_days: [&'static str; 7],
}

static EN: Table = Table {
    from_date: "From Date",
    to_date: "To Date",
    from: "From",
    to: "To",
    apply: "Apply",
    clear: "Clear",
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    week_days: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
};

static AR: Table = Table {
    from_date: "من التاريخ",
    to_date: "إلى التاريخ",
    from: "من",
    to: "إلى",
    apply: "تطبيق",
    clear: "مسح",
    months: [
        "يناير",
        "فبراير",
        "مارس",
        "إبريل",
        "مايو",
        "يونيو",
        "يوليو",
        "أغسطس",
        "سبتمبر",
        "أكتوبر",
        "نوفمبر",
        "ديسمبر",
    ],
    week_days: [
        "الأحد",
        "الإثنين",
        "الثلاثاء",
        "الأربعاء",
        "الخميس",
        "الجمعة",
        "السبت",
    ],
};

fn table(language: Language) -> &'static Table {
    match language {
        Language::En => &EN,
        Language::Ar => &AR,
    }
}

pub fn translate(key: TranslationKey, language: Language) -> Translation {
    let table = table(language);
    match key {
        TranslationKey::FromDate => Translation::Text(table.from_date),
        TranslationKey::ToDate => Translation::Text(table.to_date),
        TranslationKey::From => Translation::Text(table.from),
        TranslationKey::To => Translation::Text(table.to),
        TranslationKey::Apply => Translation::Text(table.apply),
        TranslationKey::Clear => Translation::Text(table.clear),
        TranslationKey::Months => Translation::List(&table.months),
        TranslationKey::WeekDays => Translation::List(&table.week_days),
    }
}

pub fn month_name(month: Month, language: Language) -> &'static str {
    table(language).months[usize::from(u8::from(month)) - 1]
}

/// Short weekday names, Sunday first, matching the column order of
/// [`MonthGrid`](crate::MonthGrid)
pub fn weekday_names(language: Language) -> &'static [&'static str; 7] {
    &table(language).week_days
}
