//! Per-value transform failures.
//!
//! These never abort processing: callers keep the original value and record a
//! warning.

use thiserror::Error;

/// Why a date could not be formatted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    #[error("date value is empty")]
    Empty,
    #[error("'{0}' is not an ISO 8601 calendar date (yyyy-MM-dd)")]
    NotIsoDate(String),
    #[error("'{0}' is not a valid calendar date")]
    InvalidCalendarDate(String),
}

/// Why a phone number could not be parsed or formatted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneFormatError {
    #[error("phone value is empty")]
    Empty,
    #[error("phone value contains characters other than digits and separators")]
    InvalidCharacters,
    #[error("no known country calling code at the start of +{0}")]
    UnknownCallingCode(String),
    #[error("country {0} is not in the locale rule table")]
    UnknownCountry(String),
    /// The number carries another country's calling code.
    #[error("calling code +{calling_code} does not belong to {country}")]
    ForeignCallingCode {
        country: String,
        calling_code: String,
    },
    #[error("national number for {country} has {actual} digits, expected {expected:?}")]
    InvalidLength {
        country: String,
        expected: Vec<usize>,
        actual: usize,
    },
}
