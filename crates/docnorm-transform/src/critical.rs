//! Detection of legally significant checkbox answers.
//!
//! Candidates are the explicit selection marks plus every checkbox-typed
//! field. A candidate whose normalized label contains a taxonomy term becomes
//! one [`CriticalCheckbox`]; everything else is filtered out. Nothing that
//! matches is ever dropped: unreadable states are kept as `Unselected` and
//! flagged ambiguous.

use std::collections::HashMap;

use docnorm_model::{
    CandidateSource, CriticalCheckbox, ExtractedField, FieldType, SelectionMark, SelectionState,
};
use docnorm_standards::KeywordEntry;
use serde::{Deserialize, Serialize};

use crate::text::normalize_text;

const TRUTHY: &[&str] = &[
    "yes", "y", "true", "1", "x", "selected", "checked", ":selected:", "☑", "☒",
];
const FALSY: &[&str] = &[
    "no", "n", "false", "0", "unselected", "unchecked", ":unselected:", "☐",
];

/// Read a checkbox field value as a selection state.
///
/// Returns `None` when the value is not a recognized yes/no spelling.
pub fn parse_checkbox_value(raw: &str) -> Option<SelectionState> {
    let value = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    if TRUTHY.contains(&value.as_str()) {
        Some(SelectionState::Selected)
    } else if FALSY.contains(&value.as_str()) {
        Some(SelectionState::Unselected)
    } else {
        None
    }
}

/// Thresholds for the critical field analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CriticalOptions {
    /// Candidates below this confidence (0-1) are reported as low-confidence.
    pub min_confidence: f64,
}

impl Default for CriticalOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
        }
    }
}

impl CriticalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }
}

/// Full analyzer output, including what needs human attention.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriticalAnalysis {
    pub checkboxes: Vec<CriticalCheckbox>,
    /// Selection marks without a label; they cannot be checked against the
    /// taxonomy.
    pub unlabeled_marks: usize,
    /// Indices into `checkboxes` whose confidence is below the threshold.
    pub low_confidence: Vec<usize>,
}

impl CriticalAnalysis {
    pub fn ambiguous(&self) -> impl Iterator<Item = &CriticalCheckbox> {
        self.checkboxes.iter().filter(|checkbox| checkbox.ambiguous)
    }
}

struct Matcher<'a> {
    needle: String,
    entry: &'a KeywordEntry,
}

fn prepare(keywords: &[KeywordEntry]) -> Vec<Matcher<'_>> {
    keywords
        .iter()
        .map(|entry| Matcher {
            needle: normalize_text(&entry.term),
            entry,
        })
        .filter(|matcher| !matcher.needle.is_empty())
        .collect()
}

fn find_keyword<'a>(matchers: &'a [Matcher<'a>], label: &str) -> Option<&'a KeywordEntry> {
    matchers
        .iter()
        .find(|matcher| label.contains(&matcher.needle))
        .map(|matcher| matcher.entry)
}

/// Critical checkboxes among marks and checkbox fields.
pub fn analyze_critical(
    marks: &[SelectionMark],
    fields: &[ExtractedField],
    keywords: &[KeywordEntry],
) -> Vec<CriticalCheckbox> {
    analyze_critical_detailed(marks, fields, keywords, &CriticalOptions::default()).checkboxes
}

/// Critical checkboxes with unlabeled-mark and low-confidence reporting.
///
/// Records follow input order: marks first, then fields. Candidates sharing a
/// normalized label are merged; disagreeing states make the record ambiguous.
pub fn analyze_critical_detailed(
    marks: &[SelectionMark],
    fields: &[ExtractedField],
    keywords: &[KeywordEntry],
    options: &CriticalOptions,
) -> CriticalAnalysis {
    let matchers = prepare(keywords);
    let mut analysis = CriticalAnalysis::default();
    let mut by_label: HashMap<String, usize> = HashMap::new();

    for mark in marks {
        let label = normalize_text(&mark.label);
        if label.is_empty() {
            analysis.unlabeled_marks += 1;
            continue;
        }
        let Some(entry) = find_keyword(&matchers, &label) else {
            continue;
        };

        if let Some(&index) = by_label.get(&label) {
            let record = &mut analysis.checkboxes[index];
            if record.state != mark.state {
                mark_ambiguous(record);
            }
            record.confidence = record.confidence.max(mark.confidence);
            continue;
        }

        by_label.insert(label, analysis.checkboxes.len());
        analysis.checkboxes.push(CriticalCheckbox {
            label: mark.label.trim().to_string(),
            state: mark.state,
            category: entry.category,
            matched_keyword: entry.term.clone(),
            source: CandidateSource::SelectionMark,
            confidence: mark.confidence.clamp(0.0, 1.0),
            ambiguous: false,
        });
    }

    for field in fields.iter().filter(|f| f.field_type == FieldType::Checkbox) {
        let label = normalize_text(&field.label);
        let Some(entry) = find_keyword(&matchers, &label) else {
            continue;
        };
        let state = parse_checkbox_value(&field.value);

        if let Some(&index) = by_label.get(&label) {
            let record = &mut analysis.checkboxes[index];
            // An unreadable value counts as disagreement.
            if state != Some(record.state) {
                mark_ambiguous(record);
            }
            continue;
        }

        by_label.insert(label, analysis.checkboxes.len());
        analysis.checkboxes.push(CriticalCheckbox {
            label: field.label.trim().to_string(),
            state: state.unwrap_or(SelectionState::Unselected),
            category: entry.category,
            matched_keyword: entry.term.clone(),
            source: CandidateSource::Field,
            confidence: field.unit_confidence(),
            ambiguous: state.is_none(),
        });
    }

    analysis.low_confidence = analysis
        .checkboxes
        .iter()
        .enumerate()
        .filter(|(_, checkbox)| checkbox.confidence < options.min_confidence)
        .map(|(index, _)| index)
        .collect();

    tracing::debug!(
        critical = analysis.checkboxes.len(),
        unlabeled_marks = analysis.unlabeled_marks,
        low_confidence = analysis.low_confidence.len(),
        "Analyzed critical checkboxes"
    );

    analysis
}

fn mark_ambiguous(record: &mut CriticalCheckbox) {
    record.ambiguous = true;
    record.state = SelectionState::Unselected;
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnorm_model::RiskCategory;

    fn keywords() -> Vec<KeywordEntry> {
        vec![
            KeywordEntry::new("arrest", RiskCategory::CriminalHistory),
            KeywordEntry::new("deport", RiskCategory::Deportation),
            KeywordEntry::new("over stay", RiskCategory::Overstay),
        ]
    }

    fn checkbox(label: &str, value: &str) -> ExtractedField {
        ExtractedField::new(label, value, 95.0, FieldType::Checkbox)
    }

    #[test]
    fn test_checkbox_values() {
        assert_eq!(parse_checkbox_value(" YES "), Some(SelectionState::Selected));
        assert_eq!(parse_checkbox_value(":selected:"), Some(SelectionState::Selected));
        assert_eq!(parse_checkbox_value("☒"), Some(SelectionState::Selected));
        assert_eq!(parse_checkbox_value("No"), Some(SelectionState::Unselected));
        assert_eq!(parse_checkbox_value("☐"), Some(SelectionState::Unselected));
        assert_eq!(parse_checkbox_value("maybe"), None);
        assert_eq!(parse_checkbox_value(""), None);
    }

    #[test]
    fn test_matching_field_yields_one_record() {
        let fields = vec![
            checkbox("Have you ever been arrested?", "yes"),
            checkbox("Do you smoke?", "yes"),
        ];
        let records = analyze_critical(&[], &fields, &keywords());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "Have you ever been arrested?");
        assert_eq!(records[0].state, SelectionState::Selected);
        assert_eq!(records[0].category, RiskCategory::CriminalHistory);
        assert_eq!(records[0].matched_keyword, "arrest");
        assert!(!records[0].ambiguous);
    }

    #[test]
    fn test_non_checkbox_fields_are_ignored() {
        let fields = vec![ExtractedField::new(
            "Arrest record number",
            "12345",
            90.0,
            FieldType::Text,
        )];
        assert!(analyze_critical(&[], &fields, &keywords()).is_empty());
    }

    #[test]
    fn test_ambiguous_value_is_unselected() {
        let fields = vec![checkbox("Were you ever deported?", "see attached")];
        let records = analyze_critical(&[], &fields, &keywords());
        assert_eq!(records[0].state, SelectionState::Unselected);
        assert!(records[0].ambiguous);
    }

    #[test]
    fn test_label_punctuation_is_normalized() {
        let fields = vec![checkbox("Did you OVER-STAY a visa?", "no")];
        let records = analyze_critical(&[], &fields, &keywords());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, RiskCategory::Overstay);
    }

    #[test]
    fn test_mark_and_field_with_same_label_merge() {
        let marks = vec![SelectionMark::new(
            "Have you been arrested?",
            SelectionState::Selected,
            0.9,
        )];
        let agreeing = vec![checkbox("have you been  ARRESTED?", "yes")];
        let records = analyze_critical(&marks, &agreeing, &keywords());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, CandidateSource::SelectionMark);
        assert!(!records[0].ambiguous);

        let disagreeing = vec![checkbox("Have you been arrested?", "no")];
        let records = analyze_critical(&marks, &disagreeing, &keywords());
        assert_eq!(records.len(), 1);
        assert!(records[0].ambiguous);
        assert_eq!(records[0].state, SelectionState::Unselected);
    }

    #[test]
    fn test_unreadable_field_makes_merged_mark_ambiguous() {
        let marks = vec![SelectionMark::new(
            "Have you been arrested?",
            SelectionState::Selected,
            0.9,
        )];
        let fields = vec![checkbox("Have you been arrested?", "unclear")];
        let records = analyze_critical(&marks, &fields, &keywords());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, CandidateSource::SelectionMark);
        assert!(records[0].ambiguous);
        assert_eq!(records[0].state, SelectionState::Unselected);
    }

    #[test]
    fn test_unlabeled_and_low_confidence_marks() {
        let marks = vec![
            SelectionMark::new("", SelectionState::Selected, 0.99),
            SelectionMark::new("  ", SelectionState::Unselected, 0.99),
            SelectionMark::new("Deported before?", SelectionState::Selected, 0.3),
        ];
        let fields = vec![ExtractedField::new(
            "Arrested?",
            "no",
            40.0,
            FieldType::Checkbox,
        )];
        let analysis =
            analyze_critical_detailed(&marks, &fields, &keywords(), &CriticalOptions::new());

        assert_eq!(analysis.unlabeled_marks, 2);
        assert_eq!(analysis.checkboxes.len(), 2);
        assert_eq!(analysis.checkboxes[0].source, CandidateSource::SelectionMark);
        assert_eq!(analysis.checkboxes[1].source, CandidateSource::Field);
        assert_eq!(analysis.low_confidence, vec![0, 1]);

        let relaxed = CriticalOptions::new().with_min_confidence(0.2);
        let analysis = analyze_critical_detailed(&marks, &fields, &keywords(), &relaxed);
        assert!(analysis.low_confidence.is_empty());
    }
}
