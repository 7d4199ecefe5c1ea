//! Per-country rule entries and the shared keyword taxonomy.

use std::fmt;

use docnorm_model::{CountryCode, RiskCategory};
use serde::{Deserialize, Serialize};

/// How phone numbers are rendered for a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhoneStyle {
    /// National dialing form: digits only, trunk prefix when required.
    #[default]
    Local,
    /// `+<callingCode><nationalNumber>` without separators.
    International,
    /// Canonical grouped form, e.g. `+971 50 123 4567`.
    Spaced,
}

impl PhoneStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::International => "international",
            Self::Spaced => "spaced",
        }
    }
}

impl fmt::Display for PhoneStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phone numbering plan for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneRules {
    /// Country calling code without `+` (e.g., "971").
    pub calling_code: String,
    /// Accepted lengths of the national significant number.
    pub national_lengths: Vec<usize>,
    /// Prefix dialed before national numbers inside the country (e.g., "0").
    #[serde(default)]
    pub trunk_prefix: Option<String>,
    pub style: PhoneStyle,
    /// Digit group widths for the spaced style, one entry per national length.
    #[serde(default)]
    pub groupings: Vec<Vec<usize>>,
}

impl PhoneRules {
    pub fn accepts_length(&self, len: usize) -> bool {
        self.national_lengths.contains(&len)
    }

    /// Grouping whose widths add up to `len`, if one is declared.
    pub fn grouping_for(&self, len: usize) -> Option<&[usize]> {
        self.groupings
            .iter()
            .find(|grouping| grouping.iter().sum::<usize>() == len)
            .map(Vec::as_slice)
    }

    pub fn trunk_prefix(&self) -> Option<&str> {
        self.trunk_prefix.as_deref().filter(|prefix| !prefix.is_empty())
    }
}

/// One taxonomy term and the risk category it signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordEntry {
    /// Lower-case substring matched against normalized labels.
    pub term: String,
    pub category: RiskCategory,
}

impl KeywordEntry {
    pub fn new(term: impl Into<String>, category: RiskCategory) -> Self {
        Self {
            term: term.into(),
            category,
        }
    }
}

/// Versioned shared core of critical keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordTaxonomy {
    pub version: String,
    pub core: Vec<KeywordEntry>,
}

/// All rules for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRules {
    pub code: CountryCode,
    /// Display name (e.g., "United Arab Emirates").
    pub name: String,
    /// Tie-break rank; lower values win.
    pub priority: u32,
    /// Locale region subtags that resolve to this country (e.g., "AE").
    pub regions: Vec<String>,
    /// Primary language subtags spoken on this country's documents.
    pub languages: Vec<String>,
    /// Date pattern using `dd`, `MM`, `yyyy` tokens.
    pub date_format: String,
    pub phone: PhoneRules,
    #[serde(default)]
    pub critical_keywords: Vec<KeywordEntry>,
}

impl CountryRules {
    /// Whether a primary language subtag belongs to this country.
    pub fn speaks(&self, language: &str) -> bool {
        self.languages
            .iter()
            .any(|lang| lang.eq_ignore_ascii_case(language))
    }

    pub fn uses_trunk_prefix(&self) -> bool {
        self.phone.trunk_prefix().is_some()
    }
}

/// Serialized form of a rule table, as stored in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTableDocument {
    pub taxonomy: KeywordTaxonomy,
    pub countries: Vec<CountryRules>,
}
