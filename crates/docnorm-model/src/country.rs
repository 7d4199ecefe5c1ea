//! Country identifiers.
//!
//! Country codes are plain strings owned by the locale rule table (`"UAE"`,
//! `"USA"`, `"KSA"`), wrapped in a newtype so that adding a country to the table
//! never requires a new Rust variant.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Wire value used when no country could be inferred.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// A country code as declared in the locale rule table.
///
/// # Example
///
/// ```
/// use docnorm_model::CountryCode;
///
/// let code = CountryCode::new("uae").unwrap();
/// assert_eq!(code.as_str(), "UAE");
/// assert!(CountryCode::new("U4E").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Create a country code, upper-casing the input.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into().trim().to_ascii_uppercase();
        if code.eq_ignore_ascii_case(UNKNOWN_COUNTRY) {
            return Err(ModelError::ReservedCountryCode);
        }
        let valid_len = (2..=4).contains(&code.len());
        if !valid_len || !code.chars().all(|ch| ch.is_ascii_uppercase()) {
            return Err(ModelError::InvalidCountryCode(code));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CountryCode {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outcome of country inference: a known table entry or `Unknown`.
///
/// Serializes as the bare country code, or the string `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InferredCountry {
    Known(CountryCode),
    #[default]
    Unknown,
}

impl InferredCountry {
    pub fn code(&self) -> Option<&CountryCode> {
        match self {
            Self::Known(code) => Some(code),
            Self::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(code) => code.as_str(),
            Self::Unknown => UNKNOWN_COUNTRY,
        }
    }
}

impl fmt::Display for InferredCountry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CountryCode> for InferredCountry {
    fn from(code: CountryCode) -> Self {
        Self::Known(code)
    }
}

impl From<Option<CountryCode>> for InferredCountry {
    fn from(code: Option<CountryCode>) -> Self {
        code.map_or(Self::Unknown, Self::Known)
    }
}

impl TryFrom<String> for InferredCountry {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        if value.trim().eq_ignore_ascii_case(UNKNOWN_COUNTRY) {
            return Ok(Self::Unknown);
        }
        CountryCode::new(value).map(Self::Known)
    }
}

impl From<InferredCountry> for String {
    fn from(country: InferredCountry) -> Self {
        match country {
            InferredCountry::Known(code) => code.into(),
            InferredCountry::Unknown => UNKNOWN_COUNTRY.to_string(),
        }
    }
}

impl PartialEq<&str> for InferredCountry {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_code_is_uppercased() {
        assert_eq!(CountryCode::new(" ksa ").unwrap().as_str(), "KSA");
    }

    #[test]
    fn country_code_rejects_bad_shapes() {
        assert!(CountryCode::new("").is_err());
        assert!(CountryCode::new("A").is_err());
        assert!(CountryCode::new("TOOLONG").is_err());
        assert!(CountryCode::new("U-E").is_err());
        assert_eq!(
            CountryCode::new("unknown"),
            Err(ModelError::ReservedCountryCode)
        );
    }

    #[test]
    fn inferred_country_string_forms() {
        let known = InferredCountry::from(CountryCode::new("UAE").unwrap());
        assert_eq!(known, "UAE");
        assert_eq!(InferredCountry::Unknown.to_string(), "Unknown");
        assert_eq!(
            InferredCountry::try_from("unknown".to_string()).unwrap(),
            InferredCountry::Unknown
        );
    }
}
