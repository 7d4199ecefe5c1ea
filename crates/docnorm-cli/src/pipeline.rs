//! File loading and processing for the `process` command.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use docnorm_core::{Processor, ProcessingOptions};
use docnorm_model::{DocumentExtractionResult, ProcessingResult};
use docnorm_standards::LocaleRuleTable;
use tracing::{info, info_span};

/// Read an extraction result from a JSON file.
pub fn load_document(path: &Path) -> Result<DocumentExtractionResult> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("read extraction result {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("parse extraction result {}", path.display()))
}

pub fn load_rules(path: &Path) -> Result<LocaleRuleTable> {
    LocaleRuleTable::from_json_file(path)
        .with_context(|| format!("load locale rule table {}", path.display()))
}

/// Read processing options from a JSON file; absent keys keep their defaults.
pub fn load_options(path: &Path) -> Result<ProcessingOptions> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("read processing options {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("parse processing options {}", path.display()))
}

/// Load and normalize one extraction result file.
pub fn process_file(
    path: &Path,
    table: &LocaleRuleTable,
    options: ProcessingOptions,
) -> Result<ProcessingResult> {
    let span = info_span!("process_file", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let document = load_document(path)?;
    let result = Processor::new(table, options)
        .process(&document)
        .with_context(|| format!("process {}", path.display()))?;

    info!(
        country = %result.inferred_country,
        fields = result.enhanced_fields.len(),
        critical = result.critical_checkboxes.len(),
        family_members = result.family_members.len(),
        warnings = result.warnings.len(),
        duration_ms = start.elapsed().as_millis(),
        "Document processed"
    );
    Ok(result)
}
