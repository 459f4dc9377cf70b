//! Rendered message presentation: terminal text and json.

use super::shared::to_json_pretty;
use crate::error::ExecutorError;
use crate::message::{Message, Section, Select};
use owo_colors::OwoColorize;

pub fn format_message_json(message: &Message) -> Result<String, ExecutorError> {
    to_json_pretty(message)
}

/// Human-readable rendering of a message, one block per section.
pub fn format_message_text(message: &Message) -> String {
    let mut blocks: Vec<String> = message
        .sections
        .iter()
        .map(format_section)
        .filter(|block| !block.is_empty())
        .collect();

    let mut flags = Vec::new();
    if message.replace_original {
        flags.push("replaces original");
    }
    if message.only_visible_for_you {
        flags.push("only visible to you");
    }
    if !flags.is_empty() {
        blocks.push(format!("({})", flags.join(", ")).dimmed().to_string());
    }
    blocks.join("\n\n")
}

fn format_section(section: &Section) -> String {
    let mut lines = Vec::new();

    if !section.base.header.is_empty() {
        lines.push(section.base.header.bold().to_string());
    }
    if !section.base.body.plaintext.is_empty() {
        lines.push(section.base.body.plaintext.clone());
    }
    if !section.base.body.code_block.is_empty() {
        lines.push("```".to_string());
        lines.push(section.base.body.code_block.trim_end_matches('\n').to_string());
        lines.push("```".to_string());
    }
    for select in &section.selects.items {
        format_select(select, &mut lines);
    }
    for button in &section.buttons {
        let mut line = format!("[{}] {}", button.name, button.command);
        if !button.description.is_empty() {
            line.push_str(&format!("  {}", button.description.dimmed()));
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn format_select(select: &Select, lines: &mut Vec<String>) {
    lines.push(format!("{} ({})", select.name.bold(), select.command));
    let initial = select.initial_option.as_ref().map(|o| o.value.as_str());
    for group in &select.option_groups {
        for option in &group.options {
            let marker = if Some(option.value.as_str()) == initial {
                "*"
            } else {
                " "
            };
            lines.push(format!("  {} {} -> {}", marker, option.name, option.value));
        }
    }
}
