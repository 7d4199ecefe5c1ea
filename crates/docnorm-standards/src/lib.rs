//! Locale rule table for the document normalization engine.
//!
//! The table is static, read-only per-country configuration: date pattern,
//! phone numbering plan and critical-keyword taxonomy. It is loaded once
//! (either the built-in table or a JSON file) and passed by reference into
//! each pipeline step. Adding a country means adding one entry to the table.
//!
//! ```
//! use docnorm_model::CountryCode;
//! use docnorm_standards::{LocaleRuleTable, PhoneStyle};
//!
//! let table = LocaleRuleTable::builtin();
//! let uae = table.country(&CountryCode::new("UAE").unwrap()).unwrap();
//! assert_eq!(uae.date_format, "dd/MM/yyyy");
//! assert_eq!(uae.phone.style, PhoneStyle::Local);
//! ```

pub mod error;
pub mod rules;
pub mod table;

pub use error::{Result, RulesError};
pub use rules::{
    CountryRules, KeywordEntry, KeywordTaxonomy, PhoneRules, PhoneStyle, RuleTableDocument,
};
pub use table::LocaleRuleTable;
