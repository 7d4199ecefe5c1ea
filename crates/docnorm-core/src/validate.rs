//! Structural validation of an extraction result.

use docnorm_model::{DocumentExtractionResult, DocumentMetadata};

use crate::error::{ProcessError, Result};

/// Check the parts of the input shape that processing relies on.
///
/// Returns the document metadata, which is required.
pub fn validate_structure(input: &DocumentExtractionResult) -> Result<&DocumentMetadata> {
    let metadata = input.metadata.as_ref().ok_or(ProcessError::MissingMetadata)?;

    for (index, table) in input.tables.iter().enumerate() {
        if table.column_count == 0 && !table.cells.is_empty() {
            return Err(ProcessError::InvalidTableShape { table: index });
        }
        if let Some(cell) = table
            .cells
            .iter()
            .find(|cell| cell.row_index >= table.row_count || cell.column_index >= table.column_count)
        {
            return Err(ProcessError::CellOutOfBounds {
                table: index,
                row: cell.row_index,
                column: cell.column_index,
            });
        }
    }

    Ok(metadata)
}
