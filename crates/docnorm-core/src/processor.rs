//! The processing orchestrator.
//!
//! # Processing Order
//!
//! 1. Structural validation (the only step that can fail)
//! 2. Country inference from the detected languages
//! 3. Field normalization (dates, phone numbers)
//! 4. Critical checkbox analysis
//! 5. Family table extraction
//! 6. Document-level quality checks

use docnorm_model::{
    CriticalCheckbox, DocumentExtractionResult, DocumentMetadata, FamilyMember, InferredCountry,
    ProcessingResult,
};
use docnorm_standards::{CountryRules, LocaleRuleTable};
use docnorm_transform::datetime::DatePattern;
use docnorm_transform::{
    analyze_critical_detailed, extract_family_members_with, infer_country_detailed,
};

use crate::error::Result;
use crate::fields::enhance_fields;
use crate::options::ProcessingOptions;
use crate::report::{self, Report};
use crate::validate::validate_structure;

/// Runs the normalization pipeline against one rule table.
///
/// A processor holds no per-document state; one instance can serve any number
/// of documents, from any number of threads.
#[derive(Debug, Clone)]
pub struct Processor<'a> {
    table: &'a LocaleRuleTable,
    options: ProcessingOptions,
}

impl Default for Processor<'static> {
    fn default() -> Self {
        Self::new(LocaleRuleTable::builtin(), ProcessingOptions::default())
    }
}

impl<'a> Processor<'a> {
    pub fn new(table: &'a LocaleRuleTable, options: ProcessingOptions) -> Self {
        Self { table, options }
    }

    pub fn with_options(mut self, options: ProcessingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn table(&self) -> &'a LocaleRuleTable {
        self.table
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Normalize one extraction result.
    ///
    /// Only a structurally invalid input is an error; every per-value problem
    /// is reported as a warning on the result.
    pub fn process(&self, input: &DocumentExtractionResult) -> Result<ProcessingResult> {
        let span = tracing::info_span!(
            "process_document",
            fields = input.fields.len(),
            tables = input.tables.len(),
            marks = input.selection_marks.len()
        );
        let _guard = span.enter();

        let metadata = validate_structure(input)?;
        let mut report = Report::default();

        let inferred_country = self.infer_country(input, metadata, &mut report);
        let country = inferred_country
            .code()
            .and_then(|code| self.table.country(code));

        let (enhanced_fields, counts) =
            enhance_fields(&input.fields, country, self.table, &self.options, &mut report);
        if let Some(rules) = country {
            if counts.lenient_dates > 0 {
                report.insight(report::dates_read_leniently(counts.lenient_dates));
            }
            if counts.dates > 0 {
                report.insight(report::dates_formatted(counts.dates, &rules.date_format));
            }
            if counts.phones > 0 {
                let style = self.options.phone_style.unwrap_or(rules.phone.style);
                report.insight(report::phones_formatted(counts.phones, style.as_str()));
            }
        }

        let critical_checkboxes = self.analyze_critical(input, country, &mut report);
        let family_members = self.extract_family(input, country, &mut report);
        self.check_document(metadata, &mut report);

        tracing::info!(
            country = %inferred_country,
            warnings = report.warnings.len(),
            "Processed document"
        );

        Ok(ProcessingResult {
            inferred_country,
            enhanced_fields,
            critical_checkboxes,
            family_members,
            warnings: report.warnings,
            insights: report.insights,
        })
    }

    fn infer_country(
        &self,
        input: &DocumentExtractionResult,
        metadata: &DocumentMetadata,
        report: &mut Report,
    ) -> InferredCountry {
        let signals = if metadata.languages.is_empty() && !input.languages.is_empty() {
            report.insight(report::languages_fallback());
            &input.languages
        } else {
            &metadata.languages
        };

        let inference = infer_country_detailed(signals, self.table);
        match inference.country.code().and_then(|code| self.table.country(code)) {
            Some(rules) => report.insight(report::country_inferred(&inference, rules)),
            None => report.warn(report::country_unknown()),
        }
        inference.country
    }

    fn analyze_critical(
        &self,
        input: &DocumentExtractionResult,
        country: Option<&CountryRules>,
        report: &mut Report,
    ) -> Vec<CriticalCheckbox> {
        let keywords = self.table.keywords_for(country.map(|rules| &rules.code));
        let analysis = analyze_critical_detailed(
            &input.selection_marks,
            &input.fields,
            &keywords,
            &self.options.critical_options(),
        );

        if analysis.unlabeled_marks > 0 {
            report.warn(report::unlabeled_marks(analysis.unlabeled_marks));
        }
        for (index, checkbox) in analysis.checkboxes.iter().enumerate() {
            if checkbox.ambiguous {
                report.warn(report::critical_ambiguous(checkbox));
            }
            if analysis.low_confidence.contains(&index) {
                report.warn(report::critical_low_confidence(checkbox));
            }
        }

        let selected = analysis
            .checkboxes
            .iter()
            .filter(|checkbox| checkbox.state.is_selected())
            .count();
        report.insight(report::critical_summary(analysis.checkboxes.len(), selected));

        analysis.checkboxes
    }

    fn extract_family(
        &self,
        input: &DocumentExtractionResult,
        country: Option<&CountryRules>,
        report: &mut Report,
    ) -> Vec<FamilyMember> {
        let date_format = country.map(|rules| DatePattern::parse(&rules.date_format));
        let extraction = extract_family_members_with(
            &input.tables,
            self.options.family_matching,
            date_format.as_ref(),
        );
        for note in &extraction.notes {
            report.warn(note.to_string());
        }
        report.insight(report::family_summary(
            extraction.members.len(),
            extraction.tables_used.len(),
        ));
        extraction.members
    }

    fn check_document(&self, metadata: &DocumentMetadata, report: &mut Report) {
        if metadata.has_handwriting {
            report.warn(report::handwriting());
        }
        if metadata.overall_confidence < self.options.min_document_confidence {
            report.warn(report::low_document_confidence(
                metadata.overall_confidence,
                self.options.min_document_confidence,
            ));
        }
    }
}

/// Normalize one extraction result with the built-in rule table and default
/// options.
pub fn process(input: &DocumentExtractionResult) -> Result<ProcessingResult> {
    Processor::default().process(input)
}
