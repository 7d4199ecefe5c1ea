//! Phone number parsing and country-specific rendering.
//!
//! Numbers are split into a calling code and a national significant number
//! using the numbering plans of the locale rule table, then rendered in one of
//! the [`PhoneStyle`]s.

use docnorm_model::CountryCode;
use docnorm_standards::{CountryRules, LocaleRuleTable, PhoneStyle};

use crate::error::PhoneFormatError;

const SEPARATORS: [char; 6] = [' ', '-', '.', '(', ')', '/'];

/// A phone number resolved against the rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPhone {
    /// Country whose numbering plan accepted the number.
    pub country: CountryCode,
    pub calling_code: String,
    /// National significant number, without trunk prefix.
    pub national_number: String,
}

impl ParsedPhone {
    /// Render with the given style using the owning country's rules.
    pub fn render(&self, rules: &CountryRules, style: PhoneStyle) -> String {
        match style {
            PhoneStyle::Local => {
                let trunk = rules.phone.trunk_prefix().unwrap_or_default();
                format!("{trunk}{}", self.national_number)
            }
            PhoneStyle::International => {
                format!("+{}{}", self.calling_code, self.national_number)
            }
            PhoneStyle::Spaced => {
                let national = match rules.phone.grouping_for(self.national_number.len()) {
                    Some(grouping) => group_digits(&self.national_number, grouping),
                    None => self.national_number.clone(),
                };
                format!("+{} {national}", self.calling_code)
            }
        }
    }
}

fn group_digits(digits: &str, grouping: &[usize]) -> String {
    let mut groups = Vec::with_capacity(grouping.len());
    let mut start = 0;
    for &width in grouping {
        let end = (start + width).min(digits.len());
        groups.push(&digits[start..end]);
        start = end;
    }
    groups.join(" ")
}

/// Parse a raw phone value for a country.
///
/// A leading `+` or `00` marks an international number, which must carry
/// `country`'s calling code; anything else is a national number of `country`.
/// Numbers from other countries are rejected rather than reinterpreted.
pub fn parse_phone(
    raw: &str,
    country: &CountryCode,
    table: &LocaleRuleTable,
) -> Result<ParsedPhone, PhoneFormatError> {
    let rules = table
        .country(country)
        .ok_or_else(|| PhoneFormatError::UnknownCountry(country.to_string()))?;

    let compact: String = raw.trim().chars().filter(|ch| !SEPARATORS.contains(ch)).collect();
    let (plus, digits) = match compact.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, compact.as_str()),
    };
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(PhoneFormatError::InvalidCharacters);
    }
    if digits.is_empty() {
        return Err(PhoneFormatError::Empty);
    }

    let international = if plus {
        Some(digits)
    } else {
        digits.strip_prefix("00")
    };

    let national = match international {
        Some(digits) => {
            let calling_code = table
                .calling_codes()
                .into_iter()
                .find(|code| digits.starts_with(*code))
                .ok_or_else(|| PhoneFormatError::UnknownCallingCode(digits.to_string()))?;
            if rules.phone.calling_code != calling_code {
                return Err(PhoneFormatError::ForeignCallingCode {
                    country: rules.code.to_string(),
                    calling_code: calling_code.to_string(),
                });
            }
            &digits[calling_code.len()..]
        }
        None => digits,
    };

    let national = strip_trunk_prefix(rules, national);
    if !rules.phone.accepts_length(national.len()) {
        return Err(PhoneFormatError::InvalidLength {
            country: rules.code.to_string(),
            expected: rules.phone.national_lengths.clone(),
            actual: national.len(),
        });
    }

    Ok(ParsedPhone {
        country: rules.code.clone(),
        calling_code: rules.phone.calling_code.clone(),
        national_number: national.to_string(),
    })
}

/// Drop a dialed trunk prefix, including the `+971 (0)50...` habit of keeping
/// it after the calling code.
fn strip_trunk_prefix<'a>(rules: &CountryRules, national: &'a str) -> &'a str {
    match rules.phone.trunk_prefix() {
        Some(prefix) => national.strip_prefix(prefix).unwrap_or(national),
        None => national,
    }
}

/// Format a phone number, reporting why it failed.
pub fn try_format_phone(
    raw: &str,
    country: &CountryCode,
    style: PhoneStyle,
    table: &LocaleRuleTable,
) -> Result<String, PhoneFormatError> {
    let parsed = parse_phone(raw, country, table)?;
    let rules = table
        .country(&parsed.country)
        .ok_or_else(|| PhoneFormatError::UnknownCountry(parsed.country.to_string()))?;
    Ok(parsed.render(rules, style))
}

/// Format a phone number, returning the input unchanged when it cannot be parsed.
pub fn format_phone(
    raw: &str,
    country: &CountryCode,
    style: PhoneStyle,
    table: &LocaleRuleTable,
) -> String {
    try_format_phone(raw, country, style, table).unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: &str) -> CountryCode {
        CountryCode::new(value).unwrap()
    }

    fn uae(raw: &str, style: PhoneStyle) -> String {
        format_phone(raw, &code("UAE"), style, LocaleRuleTable::builtin())
    }

    #[test]
    fn test_uae_styles() {
        assert_eq!(uae("+971 50 123 4567", PhoneStyle::Local), "0501234567");
        assert_eq!(
            uae("+971 50 123 4567", PhoneStyle::International),
            "+971501234567"
        );
        assert_eq!(uae("050-123-4567", PhoneStyle::Spaced), "+971 50 123 4567");
        assert_eq!(uae("04 123 4567", PhoneStyle::Spaced), "+971 4 123 4567");
    }

    #[test]
    fn test_double_zero_prefix_and_bracketed_trunk() {
        assert_eq!(uae("00971501234567", PhoneStyle::Local), "0501234567");
        assert_eq!(uae("+971 (0)50 123 4567", PhoneStyle::Local), "0501234567");
    }

    #[test]
    fn test_shared_calling_code_accepts_requested_country() {
        let table = LocaleRuleTable::builtin();
        let parsed = parse_phone("+1 416 555 0199", &code("CAN"), table).unwrap();
        assert_eq!(parsed.country.as_str(), "CAN");

        let parsed = parse_phone("+1 212 555 0147", &code("USA"), table).unwrap();
        assert_eq!(parsed.country.as_str(), "USA");
    }

    #[test]
    fn test_foreign_number_is_rejected() {
        let table = LocaleRuleTable::builtin();
        assert_eq!(
            try_format_phone("+44 20 7946 0958", &code("UAE"), PhoneStyle::Local, table),
            Err(PhoneFormatError::ForeignCallingCode {
                country: "UAE".to_string(),
                calling_code: "44".to_string(),
            })
        );
        assert_eq!(
            parse_phone("0044 20 7946 0958", &code("UAE"), table),
            Err(PhoneFormatError::ForeignCallingCode {
                country: "UAE".to_string(),
                calling_code: "44".to_string(),
            })
        );
        assert_eq!(uae("+44 20 7946 0958", PhoneStyle::Local), "+44 20 7946 0958");
    }

    #[test]
    fn test_failures_keep_original() {
        let table = LocaleRuleTable::builtin();
        let uae_code = code("UAE");
        assert_eq!(
            try_format_phone("+999 123", &uae_code, PhoneStyle::Local, table),
            Err(PhoneFormatError::UnknownCallingCode("999123".to_string()))
        );
        assert_eq!(
            try_format_phone("+971 50 123", &uae_code, PhoneStyle::Local, table),
            Err(PhoneFormatError::InvalidLength {
                country: "UAE".to_string(),
                expected: vec![8, 9],
                actual: 5,
            })
        );
        assert_eq!(
            try_format_phone("call 050", &uae_code, PhoneStyle::Local, table),
            Err(PhoneFormatError::InvalidCharacters)
        );
        assert_eq!(
            try_format_phone(" - ", &uae_code, PhoneStyle::Local, table),
            Err(PhoneFormatError::Empty)
        );
        assert_eq!(uae("+971 50 123", PhoneStyle::Local), "+971 50 123");
    }

    #[test]
    fn test_unknown_requested_country() {
        let result = try_format_phone(
            "0501234567",
            &code("ZZZ"),
            PhoneStyle::Local,
            LocaleRuleTable::builtin(),
        );
        assert_eq!(result, Err(PhoneFormatError::UnknownCountry("ZZZ".to_string())));
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("501234567", &[2, 3, 4]), "50 123 4567");
    }
}
