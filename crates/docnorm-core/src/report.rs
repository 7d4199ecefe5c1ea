//! Warning and insight wording.
//!
//! Messages name fields by label only. Extracted values are personal data and
//! never appear in warnings, insights or logs.

use docnorm_model::CriticalCheckbox;
use docnorm_standards::CountryRules;
use docnorm_transform::{DateFormatError, Inference, PhoneFormatError};

/// Accumulates the human-facing findings of one processing run.
#[derive(Debug, Default)]
pub(crate) struct Report {
    pub warnings: Vec<String>,
    pub insights: Vec<String>,
}

impl Report {
    pub fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }

    pub fn insight(&mut self, message: String) {
        tracing::debug!(insight = %message, "Recorded insight");
        self.insights.push(message);
    }
}

pub(crate) fn country_unknown() -> String {
    "Country could not be inferred from the detected languages; country-specific formatting was skipped"
        .to_string()
}

pub(crate) fn country_inferred(inference: &Inference, rules: &CountryRules) -> String {
    let locale = inference.locale.as_deref().unwrap_or("?");
    let mut message = format!(
        "Inferred country {} ({}) from locale {locale} with confidence {:.2}",
        rules.code, rules.name, inference.confidence
    );
    if inference.corroboration > 0.0 {
        message.push_str(", corroborated by language-only signals");
    }
    message
}

pub(crate) fn languages_fallback() -> String {
    "Document metadata lists no languages; used the top-level language signals".to_string()
}

pub(crate) fn date_skipped(label: &str) -> String {
    format!("Date field '{label}' left unchanged: country is unknown")
}

pub(crate) fn date_failed(label: &str, error: &DateFormatError) -> String {
    let reason = match error {
        DateFormatError::Empty => "value is empty",
        DateFormatError::NotIsoDate(_) => "value is not an ISO date (yyyy-MM-dd)",
        DateFormatError::InvalidCalendarDate(_) => "value is not a valid calendar date",
    };
    format!("Date field '{label}' left unchanged: {reason}")
}

pub(crate) fn date_unreadable(label: &str) -> String {
    format!("Date field '{label}' left unchanged: value could not be read as a date")
}

pub(crate) fn phone_skipped(label: &str) -> String {
    format!("Phone field '{label}' left unchanged: country is unknown")
}

pub(crate) fn phone_failed(label: &str, error: &PhoneFormatError) -> String {
    let reason = match error {
        PhoneFormatError::Empty => "value is empty".to_string(),
        PhoneFormatError::InvalidCharacters => "value contains non-digit characters".to_string(),
        PhoneFormatError::UnknownCallingCode(_) => "calling code is not recognized".to_string(),
        PhoneFormatError::UnknownCountry(code) => format!("no phone rules for {code}"),
        PhoneFormatError::ForeignCallingCode {
            country,
            calling_code,
        } => format!("calling code +{calling_code} is not a {country} number"),
        PhoneFormatError::InvalidLength {
            country,
            expected,
            actual,
        } => {
            let expected: Vec<String> = expected.iter().map(ToString::to_string).collect();
            format!(
                "{actual} digits is not a valid {country} number length (expected {})",
                expected.join(" or ")
            )
        }
    };
    format!("Phone field '{label}' left unchanged: {reason}")
}

pub(crate) fn low_field_confidence(label: &str, confidence: f64, minimum: f64) -> String {
    format!(
        "Field '{label}' left unchanged: confidence {confidence:.0} is below {minimum:.0}"
    )
}

pub(crate) fn duplicate_label(label: &str, key: &str) -> String {
    format!("Field label '{label}' appears more than once; this value is kept as '{key}'")
}

pub(crate) fn dates_formatted(count: usize, pattern: &str) -> String {
    format!("Formatted {count} date field(s) as {pattern}")
}

pub(crate) fn dates_read_leniently(count: usize) -> String {
    format!("Read {count} written date(s) before formatting")
}

pub(crate) fn phones_formatted(count: usize, style: &str) -> String {
    format!("Formatted {count} phone number(s) in {style} style")
}

pub(crate) fn unlabeled_marks(count: usize) -> String {
    format!(
        "{count} selection mark(s) have no label and could not be checked for critical questions"
    )
}

pub(crate) fn critical_ambiguous(checkbox: &CriticalCheckbox) -> String {
    format!(
        "Critical question '{}' ({}) has an ambiguous answer; treated as unselected",
        checkbox.label, checkbox.category
    )
}

pub(crate) fn critical_low_confidence(checkbox: &CriticalCheckbox) -> String {
    format!(
        "Critical question '{}' was read with low confidence ({:.2})",
        checkbox.label, checkbox.confidence
    )
}

pub(crate) fn critical_summary(total: usize, selected: usize) -> String {
    format!("Found {total} critical question(s), {selected} answered yes")
}

pub(crate) fn family_summary(members: usize, tables: usize) -> String {
    format!("Extracted {members} family member(s) from {tables} table(s)")
}

pub(crate) fn handwriting() -> String {
    "Document contains handwriting; handwritten answers need review".to_string()
}

pub(crate) fn low_document_confidence(confidence: f64, minimum: f64) -> String {
    format!("Overall extraction confidence {confidence:.2} is below {minimum:.2}")
}
