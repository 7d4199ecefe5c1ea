//! Input types produced by the upstream document-extraction service.
//!
//! These types are read-only from the engine's point of view: they are
//! deserialized once and never mutated. Field names follow the camelCase wire
//! shape of the extraction service (`rowIndex`, `selectionMarks`, ...).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Kind of value an extracted field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    #[default]
    Text,
    Date,
    Checkbox,
    /// Any type the extractor reports that the engine does not model.
    #[serde(other)]
    Other,
}

/// One key/value item from the extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedField {
    /// Label as printed on the document (e.g., "Date of Birth").
    pub label: String,
    /// Raw extracted value.
    pub value: String,
    /// OCR confidence on a 0-100 scale.
    #[serde(default)]
    pub confidence: f64,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
}

impl ExtractedField {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        confidence: f64,
        field_type: FieldType,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            confidence,
            field_type,
        }
    }

    /// Confidence rescaled to 0-1 so it can be compared with mark confidences.
    pub fn unit_confidence(&self) -> f64 {
        (self.confidence / 100.0).clamp(0.0, 1.0)
    }
}

/// Detected state of a checkbox or radio button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionState {
    Selected,
    Unselected,
}

impl SelectionState {
    pub fn is_selected(self) -> bool {
        self == Self::Selected
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::Unselected => "unselected",
        }
    }
}

/// A checkbox/radio detection.
///
/// The label is whatever text the extractor associated with the mark and may be
/// empty when association failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionMark {
    pub state: SelectionState,
    /// Detection confidence on a 0-1 scale.
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub label: String,
}

impl SelectionMark {
    pub fn new(label: impl Into<String>, state: SelectionState, confidence: f64) -> Self {
        Self {
            state,
            confidence,
            label: label.into(),
        }
    }
}

/// Role of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    ColumnHeader,
    #[default]
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub row_index: usize,
    pub column_index: usize,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub kind: CellKind,
}

impl TableCell {
    pub fn header(row_index: usize, column_index: usize, content: impl Into<String>) -> Self {
        Self {
            row_index,
            column_index,
            content: content.into(),
            kind: CellKind::ColumnHeader,
        }
    }

    pub fn content(row_index: usize, column_index: usize, content: impl Into<String>) -> Self {
        Self {
            row_index,
            column_index,
            content: content.into(),
            kind: CellKind::Content,
        }
    }

    pub fn is_header(&self) -> bool {
        self.kind == CellKind::ColumnHeader
    }
}

/// A detected table: declared dimensions plus an unordered bag of cells.
///
/// Row and column indices are the only ordering guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub row_count: usize,
    pub column_count: usize,
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

impl Table {
    pub fn new(row_count: usize, column_count: usize, cells: Vec<TableCell>) -> Self {
        Self {
            row_count,
            column_count,
            cells,
        }
    }

    /// Row indices that contain at least one column-header cell.
    pub fn header_rows(&self) -> BTreeSet<usize> {
        self.cells
            .iter()
            .filter(|cell| cell.is_header())
            .map(|cell| cell.row_index)
            .collect()
    }

    /// Column-header cells in input order.
    pub fn header_cells(&self) -> impl Iterator<Item = &TableCell> {
        self.cells.iter().filter(|cell| cell.is_header())
    }

    /// First cell at the given position, in input order.
    pub fn cell(&self, row_index: usize, column_index: usize) -> Option<&TableCell> {
        self.cells
            .iter()
            .find(|cell| cell.row_index == row_index && cell.column_index == column_index)
    }

    /// Row indices that are not header rows, ascending.
    pub fn content_rows(&self) -> Vec<usize> {
        let headers = self.header_rows();
        (0..self.row_count)
            .filter(|row| !headers.contains(row))
            .collect()
    }
}

/// A detected language with its confidence (0-1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSignal {
    /// BCP-47-like tag, e.g. `ar-AE`.
    pub locale: String,
    pub confidence: f64,
}

impl LanguageSignal {
    pub fn new(locale: impl Into<String>, confidence: f64) -> Self {
        Self {
            locale: locale.into(),
            confidence,
        }
    }
}

/// Document-level metadata reported by the extractor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub languages: Vec<LanguageSignal>,
    #[serde(default)]
    pub has_handwriting: bool,
    /// Overall extraction confidence on a 0-1 scale.
    #[serde(default)]
    pub overall_confidence: f64,
}

/// Complete output of the extraction service for one document.
///
/// `metadata` is optional on the wire so that a document missing it can be
/// deserialized and then rejected as structurally invalid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentExtractionResult {
    #[serde(default)]
    pub fields: Vec<ExtractedField>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub selection_marks: Vec<SelectionMark>,
    #[serde(default)]
    pub languages: Vec<LanguageSignal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
}
