//! Tests for critical checkbox detection.

use std::collections::BTreeSet;

use docnorm_model::{
    CountryCode, ExtractedField, FieldType, RiskCategory, SelectionMark, SelectionState,
};
use docnorm_standards::LocaleRuleTable;
use docnorm_transform::{analyze_critical, normalize_text};
use proptest::prelude::*;

const LABELS: &[&str] = &[
    "Have you ever been arrested?",
    "Do you smoke?",
    "Have you ever been deported from any country?",
    "Have you ever been refused a visa?",
    "Marital status",
    "Have you ever absconded from a sponsor?",
    "Are you subject to a travel ban?",
    "Do you hold a driving licence?",
    "Have you overstayed a visa?",
    "HAVE YOU EVER BEEN ARRESTED?",
];

const VALUES: &[&str] = &["yes", "no", "?", "x"];

fn uae_keywords() -> Vec<docnorm_standards::KeywordEntry> {
    LocaleRuleTable::builtin().keywords_for(Some(&CountryCode::new("UAE").unwrap()))
}

#[test]
fn arrested_yes_is_selected_and_smoking_is_absent() {
    let fields = vec![
        ExtractedField::new("Have you ever been arrested?", "yes", 97.0, FieldType::Checkbox),
        ExtractedField::new("Do you smoke?", "yes", 97.0, FieldType::Checkbox),
    ];
    let records = analyze_critical(&[], &fields, &uae_keywords());

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label, "Have you ever been arrested?");
    assert_eq!(records[0].state, SelectionState::Selected);
    assert_eq!(records[0].category, RiskCategory::CriminalHistory);
}

#[test]
fn country_terms_extend_the_core() {
    let marks = vec![SelectionMark::new(
        "Have you ever absconded from a sponsor?",
        SelectionState::Unselected,
        0.92,
    )];
    let table = LocaleRuleTable::builtin();

    let for_uae = analyze_critical(&marks, &[], &uae_keywords());
    assert_eq!(for_uae.len(), 1);
    assert_eq!(for_uae[0].matched_keyword, "abscond");

    let for_usa = table.keywords_for(Some(&CountryCode::new("USA").unwrap()));
    assert!(analyze_critical(&marks, &[], &for_usa).is_empty());

    let for_unknown = table.keywords_for(None);
    assert_eq!(analyze_critical(&marks, &[], &for_unknown).len(), 1);
}

#[test]
fn visa_refusal_is_categorized() {
    let fields = vec![ExtractedField::new(
        "Have you ever been refused a visa?",
        ":unselected:",
        88.0,
        FieldType::Checkbox,
    )];
    let records = analyze_critical(&[], &fields, &uae_keywords());
    assert_eq!(records[0].category, RiskCategory::VisaRefusal);
    assert_eq!(records[0].state, SelectionState::Unselected);
    assert!(!records[0].ambiguous);
}

proptest! {
    #[test]
    fn one_record_per_keyword_bearing_label(
        picks in prop::collection::vec(
            (prop::sample::select(LABELS), prop::sample::select(VALUES)),
            0..12,
        ),
    ) {
        let keywords = uae_keywords();
        let fields: Vec<ExtractedField> = picks
            .iter()
            .map(|(label, value)| ExtractedField::new(*label, *value, 90.0, FieldType::Checkbox))
            .collect();

        let records = analyze_critical(&[], &fields, &keywords);

        let expected: BTreeSet<String> = picks
            .iter()
            .map(|(label, _)| normalize_text(label))
            .filter(|label| {
                keywords
                    .iter()
                    .any(|keyword| label.contains(&normalize_text(&keyword.term)))
            })
            .collect();
        let actual: BTreeSet<String> = records
            .iter()
            .map(|record| normalize_text(&record.label))
            .collect();

        prop_assert_eq!(records.len(), expected.len());
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn ambiguous_records_are_never_selected(
        values in prop::collection::vec("[a-z?:☑☐ ]{0,6}", 1..6),
    ) {
        let fields: Vec<ExtractedField> = values
            .iter()
            .map(|value| {
                ExtractedField::new("Were you deported?", value.as_str(), 90.0, FieldType::Checkbox)
            })
            .collect();
        for record in analyze_critical(&[], &fields, &uae_keywords()) {
            if record.ambiguous {
                prop_assert_eq!(record.state, SelectionState::Unselected);
            }
        }
    }
}
