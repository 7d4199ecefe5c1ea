//! Data model for the document normalization engine.
//!
//! # Module Organization
//!
//! - [`extraction`]: Read-only input produced by the document-extraction service
//! - [`result`]: Enriched output consumed by the form auto-fill service
//! - [`country`]: Country codes and inference outcome
//! - [`error`]: Model construction errors

pub mod country;
pub mod error;
pub mod extraction;
pub mod result;

pub use country::{CountryCode, InferredCountry, UNKNOWN_COUNTRY};
pub use error::{ModelError, Result};
pub use extraction::{
    CellKind, DocumentExtractionResult, DocumentMetadata, ExtractedField, FieldType,
    LanguageSignal, SelectionMark, SelectionState, Table, TableCell,
};
pub use result::{
    CandidateSource, CriticalCheckbox, DateOfBirth, FamilyMember, ProcessingResult,
    RiskCategory,
};
