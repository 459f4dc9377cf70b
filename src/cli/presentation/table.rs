//! Parsed table presentation.

use crate::table::TableOutput;
use comfy_table::Table;

/// Grid view of the parsed columns, for checking how output is split.
pub fn format_table(parsed: &TableOutput) -> String {
    if parsed.table.headers.is_empty() {
        return "No table found.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(parsed.table.headers.clone());
    for row in &parsed.table.rows {
        table.add_row(row.clone());
    }
    format!(
        "{}\n{} column(s), {} row(s)",
        table,
        parsed.table.headers.len(),
        parsed.table.rows.len()
    )
}
