//! Transforms applied by the document normalization engine.
//!
//! Every transform is a pure function over borrowed input and the read-only
//! locale rule table:
//!
//! - **inference**: detected languages to a best-guess country
//! - **normalization**: date and phone formatting per country
//! - **critical**: critical checkbox detection against the keyword taxonomy
//! - **family**: family-member tables to typed records
//! - **text**: label and header normalization helpers

pub mod critical;
pub mod error;
pub mod family;
pub mod inference;
pub mod normalization;
pub mod text;

pub use normalization::datetime;
pub use normalization::phone;

// Re-export common functions for external use
pub use critical::{
    CriticalAnalysis, CriticalOptions, analyze_critical, analyze_critical_detailed,
    parse_checkbox_value,
};
pub use error::{DateFormatError, PhoneFormatError};
pub use family::{
    FamilyColumn, FamilyExtraction, FamilyTableMatching, TableNote, TableNoteKind,
    extract_family_members, extract_family_members_with, match_header,
};
pub use inference::{Inference, LocaleTag, infer_country, infer_country_detailed};
pub use normalization::{
    DatePattern, ParsedPhone, format_date, format_phone, normalize_date, parse_iso_date,
    parse_phone, parse_with_pattern, try_format_date, try_format_phone,
};
pub use text::normalize_text;
