use anyhow::{Context, Result};
use docnorm_core::{DateInputMode, ProcessingOptions};
use docnorm_model::ProcessingResult;
use docnorm_standards::LocaleRuleTable;
use docnorm_transform::FamilyTableMatching;

use docnorm_cli::pipeline::{load_options, load_rules, process_file};
use docnorm_cli::summary::{countries_table, print_summary};

use crate::cli::{CountriesArgs, OutputFormatArg, ProcessArgs};

pub fn run_process(args: &ProcessArgs) -> Result<ProcessingResult> {
    let custom_rules = args.rules.as_deref().map(load_rules).transpose()?;
    let rules = custom_rules
        .as_ref()
        .unwrap_or_else(|| LocaleRuleTable::builtin());
    let options = processing_options(args)?;

    let result = process_file(&args.input, rules, options)?;
    match args.format {
        OutputFormatArg::Table => print_summary(&result),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&result).context("serialize result")?;
            println!("{json}");
        }
    }
    Ok(result)
}

/// Options file (or preset) first, then flag overrides.
fn processing_options(args: &ProcessArgs) -> Result<ProcessingOptions> {
    let mut options = match &args.options {
        Some(path) => load_options(path)?,
        None if args.strict => ProcessingOptions::strict(),
        None => ProcessingOptions::default(),
    };
    if args.superset_family_tables {
        options = options.with_family_matching(FamilyTableMatching::Superset);
    }
    if args.lenient_dates {
        options = options.with_date_input(DateInputMode::Lenient);
    }
    if let Some(style) = args.phone_style {
        options = options.with_phone_style(style.into());
    }
    Ok(options)
}

pub fn run_countries(args: &CountriesArgs) -> Result<()> {
    let custom_rules = args.rules.as_deref().map(load_rules).transpose()?;
    let rules = custom_rules
        .as_ref()
        .unwrap_or_else(|| LocaleRuleTable::builtin());
    println!("{}", countries_table(rules));
    println!(
        "Critical keyword taxonomy version {} ({} core terms)",
        rules.taxonomy().version,
        rules.taxonomy().core.len()
    );
    Ok(())
}
