use thiserror::Error;

/// Structural problems that make an extraction result unprocessable.
///
/// Per-value problems (unparseable dates, unknown calling codes, ambiguous
/// answers) are never errors; they become warnings on the result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("extraction result has no document metadata")]
    MissingMetadata,
    #[error(
        "table {table}: cell at row {row}, column {column} lies outside the declared table shape"
    )]
    CellOutOfBounds {
        table: usize,
        row: usize,
        column: usize,
    },
    #[error("table {table} has cells but declares zero columns")]
    InvalidTableShape { table: usize },
}

pub type Result<T> = std::result::Result<T, ProcessError>;
