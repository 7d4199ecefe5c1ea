//! Per-field normalization: dates and phone numbers in the country's format.

use std::collections::BTreeMap;

use docnorm_model::{ExtractedField, FieldType};
use docnorm_standards::{CountryRules, LocaleRuleTable};
use docnorm_transform::datetime::{DatePattern, normalize_date, parse_iso_date};
use docnorm_transform::{normalize_text, try_format_phone};

use crate::options::{DateInputMode, ProcessingOptions};
use crate::report::{self, Report};

const PHONE_LABEL_TERMS: [&str; 4] = ["phone", "mobile", "contact number", "whatsapp"];
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Cheap check for values that look like phone numbers.
///
/// The value may only hold digits, spaces and `+-().`, with `+` only in front,
/// and 7 to 15 digits. It must also either carry an international prefix or
/// sit under a phone-like label, so plain reference numbers are left alone.
pub fn looks_like_phone(field: &ExtractedField) -> bool {
    if matches!(field.field_type, FieldType::Date | FieldType::Checkbox) {
        return false;
    }

    let value = field.value.trim();
    let charset_ok = value
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '+' | '-' | '(' | ')' | '.'));
    let plus_ok = value.rfind('+').is_none_or(|index| index == 0);
    if value.is_empty() || !charset_ok || !plus_ok {
        return false;
    }

    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return false;
    }

    value.starts_with('+') || value.starts_with("00") || has_phone_label(&field.label)
}

fn has_phone_label(label: &str) -> bool {
    let label = normalize_text(label);
    PHONE_LABEL_TERMS.iter().any(|term| label.contains(term))
        || label.split(' ').any(|word| word == "tel" || word == "telephone")
}

#[derive(Debug, Default)]
pub(crate) struct FieldCounts {
    pub dates: usize,
    pub lenient_dates: usize,
    pub phones: usize,
}

/// Normalize every field into the enhanced-field map.
///
/// Every input label gets an entry. Repeated labels are keyed `<label> #2`,
/// `<label> #3`, ... so no value is lost.
pub(crate) fn enhance_fields(
    fields: &[ExtractedField],
    country: Option<&CountryRules>,
    table: &LocaleRuleTable,
    options: &ProcessingOptions,
    report: &mut Report,
) -> (BTreeMap<String, String>, FieldCounts) {
    let mut enhanced = BTreeMap::new();
    let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
    let mut counts = FieldCounts::default();
    let pattern = country.map(|rules| DatePattern::parse(&rules.date_format));

    for field in fields {
        let seen = occurrences.entry(field.label.as_str()).or_insert(0);
        *seen += 1;
        let mut key = field.label.clone();
        if *seen > 1 || enhanced.contains_key(&key) {
            let mut n = (*seen).max(2);
            while enhanced.contains_key(&format!("{} #{n}", field.label)) {
                n += 1;
            }
            key = format!("{} #{n}", field.label);
            report.warn(report::duplicate_label(&field.label, &key));
        }

        let value = if field.field_type == FieldType::Date {
            enhance_date(field, country.zip(pattern.as_ref()), options, report, &mut counts)
        } else if looks_like_phone(field) {
            enhance_phone(field, country, table, options, report, &mut counts)
        } else {
            field.value.clone()
        };
        enhanced.insert(key, value);
    }

    (enhanced, counts)
}

fn confident(field: &ExtractedField, options: &ProcessingOptions, report: &mut Report) -> bool {
    if field.confidence < options.min_field_confidence {
        report.warn(report::low_field_confidence(
            &field.label,
            field.confidence,
            options.min_field_confidence,
        ));
        return false;
    }
    true
}

fn enhance_date(
    field: &ExtractedField,
    country: Option<(&CountryRules, &DatePattern)>,
    options: &ProcessingOptions,
    report: &mut Report,
    counts: &mut FieldCounts,
) -> String {
    let Some((rules, pattern)) = country else {
        report.warn(report::date_skipped(&field.label));
        return field.value.clone();
    };
    if !confident(field, options, report) {
        return field.value.clone();
    }

    let date = match (parse_iso_date(&field.value), options.date_input) {
        (Ok(date), _) => date,
        (Err(error), DateInputMode::Strict) => {
            report.warn(report::date_failed(&field.label, &error));
            return field.value.clone();
        }
        (Err(_), DateInputMode::Lenient) => match pattern
            .read(field.value.trim())
            .or_else(|| normalize_date(&field.value))
        {
            Some(date) => {
                counts.lenient_dates += 1;
                date
            }
            None => {
                report.warn(report::date_unreadable(&field.label));
                return field.value.clone();
            }
        },
    };

    tracing::debug!(label = %field.label, country = %rules.code, "Formatted date field");
    counts.dates += 1;
    pattern.format(date)
}

fn enhance_phone(
    field: &ExtractedField,
    country: Option<&CountryRules>,
    table: &LocaleRuleTable,
    options: &ProcessingOptions,
    report: &mut Report,
    counts: &mut FieldCounts,
) -> String {
    let Some(rules) = country else {
        report.warn(report::phone_skipped(&field.label));
        return field.value.clone();
    };
    if !confident(field, options, report) {
        return field.value.clone();
    }

    let style = options.phone_style.unwrap_or(rules.phone.style);
    match try_format_phone(&field.value, &rules.code, style, table) {
        Ok(formatted) => {
            tracing::debug!(label = %field.label, %style, "Formatted phone field");
            counts.phones += 1;
            formatted
        }
        Err(error) => {
            report.warn(report::phone_failed(&field.label, &error));
            field.value.clone()
        }
    }
}
