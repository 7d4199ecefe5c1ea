//! Country-specific date formatting and lenient date parsing.
//!
//! Formatting takes a strict ISO 8601 calendar date (`yyyy-MM-dd`) and renders
//! it with a country pattern built from the `dd`, `MM` and `yyyy` tokens.
//! Any other pattern character is copied through literally.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::error::DateFormatError;

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("Invalid ISO date regex")
});

/// One element of a tokenized date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateToken {
    /// `dd`: two-digit day of month.
    Day,
    /// `MM`: two-digit month.
    Month,
    /// `yyyy`: four-digit year.
    Year,
    /// Any run of characters that is not a token.
    Literal(String),
}

/// A date pattern split into tokens once, then applied to many dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    tokens: Vec<DateToken>,
}

impl DatePattern {
    /// Tokenize a pattern. Tokens are case-sensitive; `mm` or `YYYY` are
    /// literals.
    pub fn parse(pattern: &str) -> Self {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;

        while let Some(ch) = rest.chars().next() {
            let token = if rest.starts_with("yyyy") {
                Some((DateToken::Year, 4))
            } else if rest.starts_with("dd") {
                Some((DateToken::Day, 2))
            } else if rest.starts_with("MM") {
                Some((DateToken::Month, 2))
            } else {
                None
            };

            match token {
                Some((token, width)) => {
                    if !literal.is_empty() {
                        tokens.push(DateToken::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(token);
                    rest = &rest[width..];
                }
                None => {
                    literal.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }
        if !literal.is_empty() {
            tokens.push(DateToken::Literal(literal));
        }

        Self { tokens }
    }

    pub fn tokens(&self) -> &[DateToken] {
        &self.tokens
    }

    /// Render a date with zero-padded components.
    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                DateToken::Day => out.push_str(&format!("{:02}", date.day())),
                DateToken::Month => out.push_str(&format!("{:02}", date.month())),
                DateToken::Year => out.push_str(&format!("{:04}", date.year())),
                DateToken::Literal(text) => out.push_str(text),
            }
        }
        out
    }

    /// Read a value produced by [`DatePattern::format`] back into a date.
    pub fn read(&self, value: &str) -> Option<NaiveDate> {
        let (mut day, mut month, mut year) = (None, None, None);
        let mut rest = value;

        for token in &self.tokens {
            match token {
                DateToken::Day => day = Some(take_digits(&mut rest, 2)?),
                DateToken::Month => month = Some(take_digits(&mut rest, 2)?),
                DateToken::Year => year = Some(take_digits(&mut rest, 4)?),
                DateToken::Literal(text) => rest = rest.strip_prefix(text.as_str())?,
            }
        }
        if !rest.is_empty() {
            return None;
        }

        let year = i32::try_from(year?).ok()?;
        NaiveDate::from_ymd_opt(year, month?, day?)
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                DateToken::Day => f.write_str("dd")?,
                DateToken::Month => f.write_str("MM")?,
                DateToken::Year => f.write_str("yyyy")?,
                DateToken::Literal(text) => f.write_str(text)?,
            }
        }
        Ok(())
    }
}

fn take_digits(rest: &mut &str, width: usize) -> Option<u32> {
    let digits = rest.get(..width)?;
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    *rest = &rest[width..];
    digits.parse().ok()
}

/// Strictly parse an ISO 8601 calendar date (`yyyy-MM-dd`).
///
/// Surrounding whitespace is ignored; nothing else is tolerated.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, DateFormatError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DateFormatError::Empty);
    }

    let captures = ISO_DATE
        .captures(trimmed)
        .ok_or_else(|| DateFormatError::NotIsoDate(trimmed.to_string()))?;
    let component = |index: usize| captures[index].parse::<u32>().ok();

    let (Some(year), Some(month), Some(day)) = (component(1), component(2), component(3)) else {
        return Err(DateFormatError::NotIsoDate(trimmed.to_string()));
    };
    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(|| DateFormatError::InvalidCalendarDate(trimmed.to_string()))
}

/// Format an ISO date with a country pattern, reporting why it failed.
pub fn try_format_date(iso_date: &str, pattern: &str) -> Result<String, DateFormatError> {
    let date = parse_iso_date(iso_date)?;
    Ok(DatePattern::parse(pattern).format(date))
}

/// Format an ISO date with a country pattern.
///
/// Returns the input unchanged when it is not a valid ISO calendar date.
pub fn format_date(iso_date: &str, pattern: &str) -> String {
    try_format_date(iso_date, pattern).unwrap_or_else(|_| iso_date.to_string())
}

/// Parse a value written in the given pattern.
pub fn parse_with_pattern(value: &str, pattern: &str) -> Option<NaiveDate> {
    DatePattern::parse(pattern).read(value.trim())
}

/// Format a date as ISO 8601 (`yyyy-MM-dd`).
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Leniently parse a date written in a common form.
///
/// Day-first numeric forms are tried before month-first ones, matching how
/// most issuing countries write dates.
pub fn normalize_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = parse_iso_date(trimmed) {
        return Some(date);
    }

    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d/%m/%Y",  // 15/01/1990
        "%m/%d/%Y",  // 01/15/1990
        "%d-%m-%Y",  // 15-01-1990
        "%d.%m.%Y",  // 15.01.1990
        "%d-%b-%Y",  // 15-Jan-1990
        "%d-%B-%Y",  // 15-January-1990
        "%d %b %Y",  // 15 Jan 1990
        "%d %B %Y",  // 15 January 1990
        "%b %d, %Y", // Jan 15, 1990
        "%B %d, %Y", // January 15, 1990
        "%Y%m%d",    // 19900115
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_pattern_tokens() {
        let pattern = DatePattern::parse("dd/MM/yyyy");
        assert_eq!(
            pattern.tokens(),
            &[
                DateToken::Day,
                DateToken::Literal("/".to_string()),
                DateToken::Month,
                DateToken::Literal("/".to_string()),
                DateToken::Year,
            ]
        );
        assert_eq!(pattern.to_string(), "dd/MM/yyyy");
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        let pattern = DatePattern::parse("DD-mm-yyyy");
        assert_eq!(pattern.format(ymd(2024, 3, 9)), "DD-mm-2024");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("1990-01-15", "dd/MM/yyyy"), "15/01/1990");
        assert_eq!(format_date("1990-01-15", "MM/dd/yyyy"), "01/15/1990");
        assert_eq!(format_date("1990-01-15", "dd.MM.yyyy"), "15.01.1990");
        assert_eq!(format_date("0987-02-03", "yyyy-MM-dd"), "0987-02-03");
    }

    #[test]
    fn test_format_date_keeps_invalid_input() {
        assert_eq!(format_date("15/01/1990", "dd/MM/yyyy"), "15/01/1990");
        assert_eq!(format_date("2023-02-29", "dd/MM/yyyy"), "2023-02-29");
        assert_eq!(format_date("", "dd/MM/yyyy"), "");
    }

    #[test]
    fn test_parse_iso_date_errors() {
        assert_eq!(parse_iso_date("  "), Err(DateFormatError::Empty));
        assert_eq!(
            parse_iso_date("1990-1-15"),
            Err(DateFormatError::NotIsoDate("1990-1-15".to_string()))
        );
        assert_eq!(
            parse_iso_date("1990-13-01"),
            Err(DateFormatError::InvalidCalendarDate("1990-13-01".to_string()))
        );
        assert_eq!(parse_iso_date(" 2024-02-29 "), Ok(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_read_rejects_trailing_text() {
        let pattern = DatePattern::parse("dd/MM/yyyy");
        assert_eq!(pattern.read("15/01/1990"), Some(ymd(1990, 1, 15)));
        assert_eq!(pattern.read("15/01/19901"), None);
        assert_eq!(pattern.read("15-01-1990"), None);
    }

    #[test]
    fn test_normalize_date_forms() {
        let expected = Some(ymd(1990, 1, 15));
        assert_eq!(normalize_date("1990-01-15"), expected);
        assert_eq!(normalize_date("1990/01/15"), expected);
        assert_eq!(normalize_date("15/01/1990"), expected);
        assert_eq!(normalize_date("01/15/1990"), expected);
        assert_eq!(normalize_date("15-01-1990"), expected);
        assert_eq!(normalize_date("15.01.1990"), expected);
        assert_eq!(normalize_date("15 Jan 1990"), expected);
        assert_eq!(normalize_date("January 15, 1990"), expected);
        assert_eq!(normalize_date("15-Jan-1990"), expected);
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn test_normalize_date_prefers_day_first() {
        assert_eq!(normalize_date("03/04/2001"), Some(ymd(2001, 4, 3)));
    }
}
