//! Tests for phone number formatting.

use docnorm_model::CountryCode;
use docnorm_standards::{LocaleRuleTable, PhoneStyle};
use docnorm_transform::phone::{format_phone, parse_phone, try_format_phone};
use docnorm_transform::PhoneFormatError;
use proptest::prelude::*;

fn code(value: &str) -> CountryCode {
    CountryCode::new(value).unwrap()
}

#[test]
fn uae_international_to_local() {
    let table = LocaleRuleTable::builtin();
    assert_eq!(
        format_phone("+971 50 123 4567", &code("UAE"), PhoneStyle::Local, table),
        "0501234567"
    );
}

#[test]
fn spaced_style_uses_country_grouping() {
    let table = LocaleRuleTable::builtin();
    assert_eq!(
        format_phone("+91 98765 43210", &code("IND"), PhoneStyle::Spaced, table),
        "+91 98765 43210"
    );
    assert_eq!(
        format_phone("(212) 555-0147", &code("USA"), PhoneStyle::Spaced, table),
        "+1 212 555 0147"
    );
    assert_eq!(
        format_phone("06 12 34 56 78", &code("FRA"), PhoneStyle::Spaced, table),
        "+33 6 12 34 56 78"
    );
}

#[test]
fn national_number_without_trunk_country() {
    let table = LocaleRuleTable::builtin();
    let parsed = parse_phone("5512 3456", &code("QAT"), table).unwrap();
    assert_eq!(parsed.national_number, "55123456");
    assert_eq!(
        try_format_phone("5512 3456", &code("QAT"), PhoneStyle::International, table),
        Ok("+97455123456".to_string())
    );
}

#[test]
fn invalid_length_reports_expected_lengths() {
    let table = LocaleRuleTable::builtin();
    let err = try_format_phone("+974 5512 345", &code("QAT"), PhoneStyle::Local, table)
        .unwrap_err();
    assert_eq!(
        err,
        PhoneFormatError::InvalidLength {
            country: "QAT".to_string(),
            expected: vec![8],
            actual: 7,
        }
    );
}

proptest! {
    #[test]
    fn local_format_is_digits_with_trunk_prefix(
        index in 0usize..15,
        seed in prop::collection::vec(0u8..10, 11),
        international in any::<bool>(),
    ) {
        let table = LocaleRuleTable::builtin();
        let rules = &table.countries()[index % table.len()];
        let length = rules.phone.national_lengths[0];

        // National significant numbers never start with the trunk digit.
        let mut national: String = seed.iter().take(length).map(|d| char::from(b'0' + d)).collect();
        national.replace_range(0..1, "5");

        let raw = if international {
            format!("+{} {}", rules.phone.calling_code, national)
        } else {
            format!("{}{}", rules.phone.trunk_prefix().unwrap_or_default(), national)
        };

        let local = try_format_phone(&raw, &rules.code, PhoneStyle::Local, table).unwrap();
        prop_assert!(local.chars().all(|ch| ch.is_ascii_digit()));
        prop_assert_eq!(local.starts_with('0'), rules.uses_trunk_prefix());
        prop_assert!(local.ends_with(&national));
    }

    #[test]
    fn unparseable_input_is_returned_unchanged(raw in "[a-z +()-]{0,12}") {
        let table = LocaleRuleTable::builtin();
        prop_assert_eq!(format_phone(&raw, &code("UAE"), PhoneStyle::Spaced, table), raw);
    }
}
