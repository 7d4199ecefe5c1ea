//! Configuration options for document processing.

use docnorm_standards::PhoneStyle;
use docnorm_transform::{CriticalOptions, FamilyTableMatching};
use serde::{Deserialize, Serialize};

/// How date-typed field values are read before formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateInputMode {
    /// Only ISO `yyyy-MM-dd` values are formatted.
    #[default]
    Strict,
    /// Written dates (`15 Jan 1990`, `15/01/1990`, ...) are read first.
    Lenient,
}

/// Options controlling document processing behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessingOptions {
    pub date_input: DateInputMode,

    /// Phone style to use instead of the inferred country's style.
    pub phone_style: Option<PhoneStyle>,

    pub family_matching: FamilyTableMatching,

    /// Fields below this OCR confidence (0-100) are not transformed.
    pub min_field_confidence: f64,

    /// Critical answers below this confidence (0-1) are flagged for review.
    pub min_critical_confidence: f64,

    /// Documents below this overall confidence (0-1) are flagged for review.
    pub min_document_confidence: f64,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            date_input: DateInputMode::Strict,
            phone_style: None,
            family_matching: FamilyTableMatching::Strict,
            min_field_confidence: 50.0,
            min_critical_confidence: 0.5,
            min_document_confidence: 0.6,
        }
    }
}

impl ProcessingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for submissions that tolerate no guessing.
    ///
    /// Only ISO dates are formatted, family tables must match exactly, and
    /// the confidence bars are raised so more answers go to review.
    pub fn strict() -> Self {
        Self {
            date_input: DateInputMode::Strict,
            family_matching: FamilyTableMatching::Strict,
            min_field_confidence: 80.0,
            min_critical_confidence: 0.8,
            min_document_confidence: 0.8,
            ..Default::default()
        }
    }

    pub fn with_date_input(mut self, mode: DateInputMode) -> Self {
        self.date_input = mode;
        self
    }

    pub fn with_phone_style(mut self, style: PhoneStyle) -> Self {
        self.phone_style = Some(style);
        self
    }

    pub fn with_family_matching(mut self, matching: FamilyTableMatching) -> Self {
        self.family_matching = matching;
        self
    }

    pub fn with_min_field_confidence(mut self, confidence: f64) -> Self {
        self.min_field_confidence = confidence;
        self
    }

    pub fn with_min_critical_confidence(mut self, confidence: f64) -> Self {
        self.min_critical_confidence = confidence;
        self
    }

    pub fn with_min_document_confidence(mut self, confidence: f64) -> Self {
        self.min_document_confidence = confidence;
        self
    }

    pub fn critical_options(&self) -> CriticalOptions {
        CriticalOptions::new().with_min_confidence(self.min_critical_confidence)
    }
}
