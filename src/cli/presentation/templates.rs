//! Template listing presentation.

use super::shared::{format_section_heading, to_json_pretty};
use crate::error::ExecutorError;
use crate::template::Template;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;

pub fn format_templates_text(templates: &[Template]) -> String {
    if templates.is_empty() {
        return "No templates loaded.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Trigger", "Type"]);
    for (idx, template) in templates.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            template.trigger.command.clone(),
            template.template_type.clone(),
        ]);
    }
    format!(
        "{}\n\n{}",
        format_section_heading(&format!("Templates ({})", templates.len())),
        table
    )
}

pub fn format_templates_json(templates: &[Template]) -> Result<String, ExecutorError> {
    let arr: Vec<serde_json::Value> = templates
        .iter()
        .map(|t| {
            json!({
                "trigger": t.trigger.command,
                "type": t.template_type,
            })
        })
        .collect();
    to_json_pretty(&arr)
}
