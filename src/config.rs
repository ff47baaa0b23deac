use crate::format::{parse_date, DateValue};
use crate::i18n::Language;
use crate::selection::{Bounds, Side};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Date;

/// Everything a host supplies to a [`DateRangePicker`](crate::DateRangePicker).
///
/// A configuration can also be read from a TOML file with
/// [`PickerConfig::load()`], e.g.:
///
/// ```toml
/// default-language = "ar"
/// min-date = "01/01/2024"
/// max-date = "31/12/2024"
/// initial-from-date = "05/01/2024"
/// show-to-date = true
///
/// [placeholders.from]
/// en = "Start"
/// ar = "البداية"
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawConfig")]
pub struct PickerConfig {
    /// Language used when the host does not report an active language
    pub default_language: Language,
    /// The host application's active language, if it has one
    pub host_language: Option<Language>,
    pub min_date: Option<Date>,
    pub max_date: Option<Date>,
    pub show_label: bool,
    pub placeholders: Placeholders,
    /// When `false`, only the start date can be picked
    pub show_to_date: bool,
    pub initial_from_date: Option<DateValue>,
    pub initial_to_date: Option<DateValue>,
}

impl Default for PickerConfig {
    fn default() -> PickerConfig {
        PickerConfig {
            default_language: Language::default(),
            host_language: None,
            min_date: None,
            max_date: None,
            show_label: true,
            placeholders: Placeholders::default(),
            show_to_date: true,
            initial_from_date: None,
            initial_to_date: None,
        }
    }
}

impl PickerConfig {
    pub fn load(path: &Path) -> Result<PickerConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        PickerConfig::from_toml(&content)
    }

    pub fn from_toml(s: &str) -> Result<PickerConfig, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// The language the picker should display: the host's if known,
    /// otherwise the default
    pub fn language(&self) -> Language {
        self.host_language.unwrap_or(self.default_language)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min_date, self.max_date)
    }

    pub fn initial_date(&self, side: Side) -> Option<&DateValue> {
        match side {
            Side::From => self.initial_from_date.as_ref(),
            Side::To => self.initial_to_date.as_ref(),
        }
    }

    /// Overwrite every field that `update` sets.  Returns `true` if either
    /// initial date was among them.
    pub fn merge(&mut self, update: ConfigUpdate) -> bool {
        let ConfigUpdate {
            default_language,
            host_language,
            min_date,
            max_date,
            show_label,
            placeholders,
            show_to_date,
            initial_from_date,
            initial_to_date,
        } = update;
        if let Some(lang) = default_language {
            self.default_language = lang;
        }
        if let Some(lang) = host_language {
            self.host_language = lang;
        }
        if let Some(d) = min_date {
            self.min_date = d;
        }
        if let Some(d) = max_date {
            self.max_date = d;
        }
        if let Some(b) = show_label {
            self.show_label = b;
        }
        if let Some(p) = placeholders {
            self.placeholders = p;
        }
        if let Some(b) = show_to_date {
            self.show_to_date = b;
        }
        let mut dates_changed = false;
        if let Some(value) = initial_from_date {
            self.initial_from_date = value;
            dates_changed = true;
        }
        if let Some(value) = initial_to_date {
            self.initial_to_date = value;
            dates_changed = true;
        }
        dates_changed
    }
}

/// A partial replacement for a [`PickerConfig`].  Fields left as `None` are
/// kept; the nested `Option`s allow clearing a value with `Some(None)`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConfigUpdate {
    pub default_language: Option<Language>,
    pub host_language: Option<Option<Language>>,
    pub min_date: Option<Option<Date>>,
    pub max_date: Option<Option<Date>>,
    pub show_label: Option<bool>,
    pub placeholders: Option<Placeholders>,
    pub show_to_date: Option<bool>,
    pub initial_from_date: Option<Option<DateValue>>,
    pub initial_to_date: Option<Option<DateValue>>,
}

/// Placeholder text shown in each empty date field
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Placeholders {
    pub from: LocalizedText,
    pub to: LocalizedText,
}

impl Placeholders {
    pub fn get(&self, side: Side) -> &LocalizedText {
        match side {
            Side::From => &self.from,
            Side::To => &self.to,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LocalizedText {
    pub en: Option<String>,
    pub ar: Option<String>,
}

impl LocalizedText {
    pub fn get(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.en.as_deref(),
            Language::Ar => self.ar.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    default_language: Option<Language>,
    host_language: Option<Language>,
    min_date: Option<String>,
    max_date: Option<String>,
    show_label: Option<bool>,
    placeholders: Placeholders,
    show_to_date: Option<bool>,
    initial_from_date: Option<String>,
    initial_to_date: Option<String>,
}

impl TryFrom<RawConfig> for PickerConfig {
    type Error = InvalidBoundError;

    fn try_from(raw: RawConfig) -> Result<PickerConfig, InvalidBoundError> {
        let defaults = PickerConfig::default();
        Ok(PickerConfig {
            default_language: raw.default_language.unwrap_or(defaults.default_language),
            host_language: raw.host_language,
            min_date: raw.min_date.as_deref().map(parse_bound).transpose()?,
            max_date: raw.max_date.as_deref().map(parse_bound).transpose()?,
            show_label: raw.show_label.unwrap_or(defaults.show_label),
            placeholders: raw.placeholders,
            show_to_date: raw.show_to_date.unwrap_or(defaults.show_to_date),
            // Initial dates are validated (and possibly ignored) when the
            // picker is initialized, not here.
            initial_from_date: raw.initial_from_date.map(DateValue::Text),
            initial_to_date: raw.initial_to_date.map(DateValue::Text),
        })
    }
}

fn parse_bound(s: &str) -> Result<Date, InvalidBoundError> {
    parse_date(s).ok_or_else(|| InvalidBoundError(s.to_owned()))
}

// serde turns this into a `toml::de::Error` carrying the message, so callers
// see it as `ConfigError::Parse`
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid date {0:?}; expected DD/MM/YYYY")]
struct InvalidBoundError(String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Malformed TOML, unknown fields or languages, and unparseable
    /// `min-date`/`max-date` values
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
}
