//! Family-member table extraction.
//!
//! Header cells are matched to canonical columns through an alias table, with
//! a Jaro-Winkler fallback for OCR typos. Tables that do not look like family
//! tables are skipped; tables that almost do produce a [`TableNote`] so the
//! caller can ask for review.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use docnorm_model::{DateOfBirth, FamilyMember, Table};
use rapidfuzz::distance::jaro_winkler;
use serde::{Deserialize, Serialize};

use crate::normalization::datetime::{DatePattern, parse_iso_date};
use crate::text::{normalize_text, strip_parenthesized};

/// Minimum Jaro-Winkler similarity for a header to match an alias.
const MIN_HEADER_SIMILARITY: f64 = 0.92;

/// Canonical family-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FamilyColumn {
    Name,
    Relationship,
    DateOfBirth,
}

impl FamilyColumn {
    pub const REQUIRED: [FamilyColumn; 2] = [FamilyColumn::Name, FamilyColumn::Relationship];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Relationship => "Relationship",
            Self::DateOfBirth => "Date of Birth",
        }
    }
}

impl fmt::Display for FamilyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized header spellings and the column they name.
const HEADER_ALIASES: &[(&str, FamilyColumn)] = &[
    ("name", FamilyColumn::Name),
    ("names", FamilyColumn::Name),
    ("full name", FamilyColumn::Name),
    ("full names", FamilyColumn::Name),
    ("name in full", FamilyColumn::Name),
    ("member name", FamilyColumn::Name),
    ("family member", FamilyColumn::Name),
    ("family member name", FamilyColumn::Name),
    ("name of family member", FamilyColumn::Name),
    ("relationship", FamilyColumn::Relationship),
    ("relation", FamilyColumn::Relationship),
    ("relationship to applicant", FamilyColumn::Relationship),
    ("relationship with applicant", FamilyColumn::Relationship),
    ("relation to applicant", FamilyColumn::Relationship),
    ("relation with applicant", FamilyColumn::Relationship),
    ("kinship", FamilyColumn::Relationship),
    ("date of birth", FamilyColumn::DateOfBirth),
    ("dob", FamilyColumn::DateOfBirth),
    ("d o b", FamilyColumn::DateOfBirth),
    ("birth date", FamilyColumn::DateOfBirth),
    ("birthdate", FamilyColumn::DateOfBirth),
    ("date born", FamilyColumn::DateOfBirth),
];

/// Match a header cell to a canonical column.
pub fn match_header(header: &str) -> Option<FamilyColumn> {
    let normalized = normalize_text(&strip_parenthesized(header));
    if normalized.is_empty() {
        return None;
    }

    if let Some((_, column)) = HEADER_ALIASES.iter().find(|(alias, _)| *alias == normalized) {
        return Some(*column);
    }

    let mut best: Option<(f64, FamilyColumn)> = None;
    for (alias, column) in HEADER_ALIASES {
        let score = jaro_winkler::similarity(normalized.chars(), alias.chars());
        if score >= MIN_HEADER_SIMILARITY && best.is_none_or(|(top, _)| score > top) {
            best = Some((score, *column));
        }
    }
    best.map(|(_, column)| column)
}

/// How strictly a table's header set must match the family columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FamilyTableMatching {
    /// Every header must map to a distinct family column.
    #[default]
    Strict,
    /// Extra, unrelated columns are allowed.
    Superset,
}

/// Something about a table or row that needs human attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNote {
    /// Table index in the extraction result.
    pub table: usize,
    /// Row index, for row-level notes.
    pub row: Option<usize>,
    pub kind: TableNoteKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableNoteKind {
    /// Some family columns were found but a required one is missing.
    MissingColumns(Vec<FamilyColumn>),
    /// Strict matching rejected headers that are not family columns.
    ExtraColumns(Vec<String>),
    /// Two headers resolved to the same family column.
    DuplicateColumn(FamilyColumn),
    BlankName,
    /// Date of birth kept as written because it could not be parsed.
    UnparsedDateOfBirth,
}

impl fmt::Display for TableNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table + 1;
        match &self.kind {
            TableNoteKind::MissingColumns(columns) => {
                let names: Vec<&str> = columns.iter().map(|column| column.label()).collect();
                write!(
                    f,
                    "Table {table} looks like a family table but has no {} column; skipped",
                    names.join(" or ")
                )
            }
            TableNoteKind::ExtraColumns(headers) => write!(
                f,
                "Table {table} has family columns plus unrecognized headers ({}); skipped",
                headers.join(", ")
            ),
            TableNoteKind::DuplicateColumn(column) => write!(
                f,
                "Table {table} has more than one {column} column; skipped"
            ),
            TableNoteKind::BlankName => match self.row {
                Some(row) => write!(f, "Table {table}, row {row}: family member name is blank"),
                None => write!(f, "Table {table}: family member name is blank"),
            },
            TableNoteKind::UnparsedDateOfBirth => match self.row {
                Some(row) => write!(
                    f,
                    "Table {table}, row {row}: date of birth could not be parsed; kept as written"
                ),
                None => write!(f, "Table {table}: date of birth could not be parsed"),
            },
        }
    }
}

/// Members plus bookkeeping about which tables were used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FamilyExtraction {
    pub members: Vec<FamilyMember>,
    /// Indices of tables recognized as family tables.
    pub tables_used: Vec<usize>,
    pub notes: Vec<TableNote>,
}

/// Family members from every recognized table, with strict header matching.
///
/// Only ISO `yyyy-MM-dd` dates of birth are parsed.
pub fn extract_family_members(tables: &[Table]) -> Vec<FamilyMember> {
    extract_family_members_with(tables, FamilyTableMatching::Strict, None).members
}

/// Family members from every recognized table, in table then row order.
///
/// A date of birth is parsed as ISO or with `date_format`, the issuing
/// country's pattern. Anything else is kept as written and noted.
pub fn extract_family_members_with(
    tables: &[Table],
    matching: FamilyTableMatching,
    date_format: Option<&DatePattern>,
) -> FamilyExtraction {
    let mut extraction = FamilyExtraction::default();

    for (index, table) in tables.iter().enumerate() {
        let Some(columns) = resolve_columns(index, table, matching, &mut extraction.notes) else {
            continue;
        };
        extraction.tables_used.push(index);

        for row in table.content_rows() {
            let read = |column: FamilyColumn| {
                columns
                    .get(&column)
                    .and_then(|&col| table.cell(row, col))
                    .map(|cell| cell.content.trim())
                    .unwrap_or_default()
            };

            let name = read(FamilyColumn::Name);
            if name.is_empty() {
                extraction.notes.push(TableNote {
                    table: index,
                    row: Some(row),
                    kind: TableNoteKind::BlankName,
                });
            }

            let raw_dob = read(FamilyColumn::DateOfBirth);
            let date_of_birth = if raw_dob.is_empty() {
                None
            } else if let Some(date) = read_date_of_birth(raw_dob, date_format) {
                Some(DateOfBirth::Parsed(date))
            } else {
                extraction.notes.push(TableNote {
                    table: index,
                    row: Some(row),
                    kind: TableNoteKind::UnparsedDateOfBirth,
                });
                Some(DateOfBirth::Unparsed(raw_dob.to_string()))
            };

            extraction.members.push(FamilyMember {
                name: name.to_string(),
                relationship: read(FamilyColumn::Relationship).to_string(),
                date_of_birth,
            });
        }
    }

    tracing::debug!(
        tables = tables.len(),
        family_tables = extraction.tables_used.len(),
        members = extraction.members.len(),
        "Extracted family members"
    );

    extraction
}

fn read_date_of_birth(value: &str, date_format: Option<&DatePattern>) -> Option<NaiveDate> {
    parse_iso_date(value)
        .ok()
        .or_else(|| date_format.and_then(|pattern| pattern.read(value)))
}

/// Column index per family column, or `None` when the table is not used.
fn resolve_columns(
    index: usize,
    table: &Table,
    matching: FamilyTableMatching,
    notes: &mut Vec<TableNote>,
) -> Option<BTreeMap<FamilyColumn, usize>> {
    let mut headers: Vec<_> = table
        .header_cells()
        .filter(|cell| !cell.content.trim().is_empty())
        .collect();
    headers.sort_by_key(|cell| (cell.row_index, cell.column_index));

    let mut columns = BTreeMap::new();
    let mut extra = Vec::new();
    let mut duplicate = None;
    for cell in headers {
        match match_header(&cell.content) {
            Some(column) if columns.contains_key(&column) => {
                duplicate = duplicate.or(Some(column));
            }
            Some(column) => {
                columns.insert(column, cell.column_index);
            }
            None => extra.push(cell.content.trim().to_string()),
        }
    }

    if columns.is_empty() {
        tracing::debug!(table = index, "Skipping table without family headers");
        return None;
    }

    let mut note = |kind| {
        notes.push(TableNote {
            table: index,
            row: None,
            kind,
        });
    };

    let missing: Vec<FamilyColumn> = FamilyColumn::REQUIRED
        .into_iter()
        .filter(|column| !columns.contains_key(column))
        .collect();
    if !missing.is_empty() {
        note(TableNoteKind::MissingColumns(missing));
        return None;
    }

    if matching == FamilyTableMatching::Strict {
        if let Some(column) = duplicate {
            note(TableNoteKind::DuplicateColumn(column));
            return None;
        }
        if !extra.is_empty() {
            note(TableNoteKind::ExtraColumns(extra));
            return None;
        }
    }

    Some(columns)
}
