//! Rendering validation results.

use std::path::Path;

use chrono::Utc;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use hxl_validate::{ValidationError, ValidationSummary};

const REPORT_SCHEMA: &str = "hxl.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// JSON report document for one validation run.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub schema_file: String,
    /// Input path, or `-` for stdin.
    pub input: String,
    #[serde(flatten)]
    pub summary: ValidationSummary,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new(
        schema_file: &Path,
        input: Option<&Path>,
        summary: ValidationSummary,
        errors: Vec<ValidationError>,
    ) -> Self {
        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            schema_file: schema_file.display().to_string(),
            input: input.map_or_else(|| "-".to_string(), |path| path.display().to_string()),
            summary,
            errors,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One line describing the outcome of a run.
pub fn summary_line(summary: &ValidationSummary) -> String {
    if summary.is_valid() {
        format!("Valid: {} row(s) checked", summary.rows_checked)
    } else {
        format!(
            "Invalid: {} of {} row(s) failed with {} error(s)",
            summary.invalid_rows, summary.rows_checked, summary.error_count
        )
    }
}

/// Violations as a table, in report order.
pub fn error_table(errors: &[ValidationError]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Line"),
        header_cell("Tag"),
        header_cell("Error"),
        header_cell("Value"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for error in errors {
        table.add_row(vec![
            optional_cell(error.row_number),
            optional_cell(error.source_row_number),
            Cell::new(&error.tag).fg(Color::Cyan),
            kind_cell(error),
            error
                .value
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&error.message),
        ]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn optional_cell(value: Option<usize>) -> Cell {
    value.map_or_else(|| dim_cell("-"), Cell::new)
}

fn kind_cell(error: &ValidationError) -> Cell {
    let color = if error.kind.is_cardinality() {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(error.kind.code()).fg(color)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
