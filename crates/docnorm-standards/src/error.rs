use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a locale rule table.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rule table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid rule table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rule table declares no countries")]
    Empty,

    #[error("country {0} is declared more than once")]
    DuplicateCountry(String),

    #[error("region {region} is claimed by both {first} and {second}")]
    DuplicateRegion {
        region: String,
        first: String,
        second: String,
    },

    #[error("country {country} has invalid region subtag '{region}'")]
    InvalidRegion { country: String, region: String },

    #[error("country {country} date pattern '{pattern}' must contain dd, MM and yyyy")]
    InvalidDatePattern { country: String, pattern: String },

    #[error("country {country} has invalid calling code '{code}'")]
    InvalidCallingCode { country: String, code: String },

    #[error("country {country} declares no national number lengths")]
    MissingNationalLengths { country: String },

    #[error("country {country} grouping {grouping:?} does not match any national length")]
    InvalidGrouping {
        country: String,
        grouping: Vec<usize>,
    },

    #[error("empty keyword term in {scope}")]
    EmptyKeyword { scope: String },
}

pub type Result<T> = std::result::Result<T, RulesError>;
