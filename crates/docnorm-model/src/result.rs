//! Output types produced by the normalization engine.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::country::InferredCountry;
use crate::extraction::SelectionState;

/// Legal-risk category assigned to a critical checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskCategory {
    /// Arrests, convictions, criminal records.
    CriminalHistory,
    /// Deportation, removal, expulsion.
    Deportation,
    /// Prior visa refusals or denials.
    VisaRefusal,
    /// Staying beyond an authorized period.
    Overstay,
    /// Entry bans and prohibited entry.
    EntryBan,
    /// Terrorism, espionage, war crimes.
    Security,
    /// Forged documents and misrepresentation.
    Fraud,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 7] = [
        RiskCategory::CriminalHistory,
        RiskCategory::Deportation,
        RiskCategory::VisaRefusal,
        RiskCategory::Overstay,
        RiskCategory::EntryBan,
        RiskCategory::Security,
        RiskCategory::Fraud,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::CriminalHistory => "criminal history",
            Self::Deportation => "deportation",
            Self::VisaRefusal => "visa refusal",
            Self::Overstay => "overstay",
            Self::EntryBan => "entry ban",
            Self::Security => "security",
            Self::Fraud => "fraud",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a critical checkbox candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateSource {
    SelectionMark,
    Field,
}

/// A checkbox whose label matched the critical-keyword taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalCheckbox {
    /// Label as it appeared on the document.
    pub label: String,
    pub state: SelectionState,
    pub category: RiskCategory,
    /// Taxonomy term that matched the label.
    pub matched_keyword: String,
    pub source: CandidateSource,
    /// Confidence on a 0-1 scale.
    pub confidence: f64,
    /// True when the state could not be read unambiguously; the state is then
    /// `Unselected` and the record must be reviewed by a human.
    #[serde(default)]
    pub ambiguous: bool,
}

/// Date of birth read from a family table.
///
/// Serializes as an ISO `yyyy-MM-dd` string when parsed, otherwise as the raw
/// cell text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateOfBirth {
    Parsed(NaiveDate),
    Unparsed(String),
}

impl DateOfBirth {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Parsed(date) => Some(*date),
            Self::Unparsed(_) => None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}

impl fmt::Display for DateOfBirth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Unparsed(raw) => f.write_str(raw),
        }
    }
}

/// One row of a recognized family-members table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub name: String,
    pub relationship: String,
    /// Absent when the table has no date-of-birth column or the cell is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateOfBirth>,
}

/// Enriched, submission-ready view of one extraction result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub inferred_country: InferredCountry,
    /// Original field label -> normalized value. Every input label is present.
    pub enhanced_fields: BTreeMap<String, String>,
    pub critical_checkboxes: Vec<CriticalCheckbox>,
    pub family_members: Vec<FamilyMember>,
    /// Transforms that could not be applied confidently.
    pub warnings: Vec<String>,
    /// Facts the engine inferred successfully.
    pub insights: Vec<String>,
}

impl ProcessingResult {
    /// True when any critical checkbox could not be read unambiguously.
    pub fn has_ambiguous_critical(&self) -> bool {
        self.critical_checkboxes.iter().any(|cb| cb.ambiguous)
    }

    /// Whether a human must review the form before submission.
    ///
    /// Any warning, or any ambiguous critical checkbox, blocks auto-submission.
    pub fn requires_review(&self) -> bool {
        !self.warnings.is_empty() || self.has_ambiguous_critical()
    }

    /// Critical checkboxes that were answered "yes".
    pub fn selected_critical(&self) -> impl Iterator<Item = &CriticalCheckbox> {
        self.critical_checkboxes
            .iter()
            .filter(|cb| cb.state.is_selected())
    }
}
