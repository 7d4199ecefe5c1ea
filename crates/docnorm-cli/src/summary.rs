//! Terminal rendering of processing results and rule tables.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use docnorm_model::{CriticalCheckbox, ProcessingResult};
use docnorm_standards::LocaleRuleTable;

pub fn print_summary(result: &ProcessingResult) {
    println!("Country: {}", result.inferred_country);
    println!("{}", fields_table(result));
    if !result.critical_checkboxes.is_empty() {
        println!("{}", critical_table(result));
    }
    if !result.family_members.is_empty() {
        println!("{}", family_table(result));
    }
    print_messages("Insights", &result.insights);
    print_messages("Warnings", &result.warnings);
    if result.requires_review() {
        println!("Review required before submission.");
    }
}

fn print_messages(title: &str, messages: &[String]) {
    if messages.is_empty() {
        return;
    }
    println!("{title}:");
    for message in messages {
        println!("- {message}");
    }
}

pub fn fields_table(result: &ProcessingResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (label, value) in &result.enhanced_fields {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

pub fn critical_table(result: &ProcessingResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Question"),
        header_cell("Category"),
        header_cell("Answer"),
        header_cell("Confidence"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for checkbox in &result.critical_checkboxes {
        table.add_row(vec![
            Cell::new(&checkbox.label),
            Cell::new(checkbox.category),
            answer_cell(checkbox),
            Cell::new(format!("{:.2}", checkbox.confidence)),
        ]);
    }
    table
}

pub fn family_table(result: &ProcessingResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Relationship"),
        header_cell("Date of Birth"),
    ]);
    apply_summary_table_style(&mut table);
    for member in &result.family_members {
        let date_of_birth = match &member.date_of_birth {
            Some(date) if date.is_parsed() => Cell::new(date),
            Some(date) => Cell::new(date).fg(Color::Yellow),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&member.name),
            Cell::new(&member.relationship),
            date_of_birth,
        ]);
    }
    table
}

/// One row per country, in priority order.
pub fn countries_table(rules: &LocaleRuleTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Country"),
        header_cell("Regions"),
        header_cell("Date Format"),
        header_cell("Calling Code"),
        header_cell("Phone Style"),
        header_cell("Keywords"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 6, CellAlignment::Right);
    for country in rules.countries() {
        table.add_row(vec![
            Cell::new(&country.code).add_attribute(Attribute::Bold),
            Cell::new(&country.name),
            Cell::new(country.regions.join(", ")),
            Cell::new(&country.date_format),
            Cell::new(format!("+{}", country.phone.calling_code)),
            Cell::new(country.phone.style),
            count_cell(country.critical_keywords.len()),
        ]);
    }
    table
}

fn answer_cell(checkbox: &CriticalCheckbox) -> Cell {
    if checkbox.ambiguous {
        Cell::new("ambiguous")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else if checkbox.state.is_selected() {
        Cell::new("yes").fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell("no")
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
