//! Processing orchestrator for the document normalization engine.
//!
//! [`process`] turns one [`DocumentExtractionResult`] into a
//! [`ProcessingResult`]: it infers the issuing country, rewrites dates and
//! phone numbers in that country's format, flags critical checkbox answers,
//! extracts family-member tables, and explains every inference and every
//! degraded step as an insight or a warning.
//!
//! ```
//! use docnorm_core::process;
//! use docnorm_model::{DocumentExtractionResult, DocumentMetadata, LanguageSignal};
//!
//! let input = DocumentExtractionResult {
//!     metadata: Some(DocumentMetadata {
//!         page_count: 1,
//!         languages: vec![LanguageSignal::new("ar-AE", 0.9)],
//!         has_handwriting: false,
//!         overall_confidence: 0.95,
//!     }),
//!     ..Default::default()
//! };
//! let result = process(&input).unwrap();
//! assert_eq!(result.inferred_country.as_str(), "UAE");
//! ```
//!
//! [`DocumentExtractionResult`]: docnorm_model::DocumentExtractionResult
//! [`ProcessingResult`]: docnorm_model::ProcessingResult

pub mod error;
pub mod fields;
pub mod options;
pub mod processor;
mod report;
pub mod validate;

pub use error::{ProcessError, Result};
pub use fields::looks_like_phone;
pub use options::{DateInputMode, ProcessingOptions};
pub use processor::{Processor, process};
pub use validate::validate_structure;
