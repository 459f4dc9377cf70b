//! Interactive table renderer
//!
//! Parses the command output as a space-aligned table and builds three
//! sections: row dropdowns, a preview of the selected row, and the actions
//! available for that row. The selected row survives re-renders through the
//! interaction state: every row dropdown re-issues the same command, and the
//! chosen option's `@idx:N` value is read back from the state on the next call.

use crate::ansi::strip_ansi;
use crate::command::{self, Command, RAW_DIRECTIVE};
use crate::error::ExecutorError;
use crate::message::{
    bot_command, Button, Message, OptionGroup, OptionItem, Section, Select, Selects,
};
use crate::renderer::evaluator::{row_data, Evaluator, RowData};
use crate::renderer::Renderer;
use crate::state::Container;
use crate::table::{table_separated, TableOutput};
use crate::template::{ParseMessage, Select as SelectTemplate, Template};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Body of the message sent when the output has no data rows.
pub const NOT_FOUND: &str = "Not found.";
pub const ACTIONS_SELECT_NAME: &str = "Actions";
pub const RAW_OUTPUT_BUTTON: &str = "Raw output";

pub struct TableRenderer {
    evaluator: Arc<dyn Evaluator>,
    invocation_prefix: String,
}

impl TableRenderer {
    /// `invocation_prefix` is prepended to rendered action commands (e.g. `x run`).
    pub fn new(evaluator: Arc<dyn Evaluator>, invocation_prefix: &str) -> Self {
        Self {
            evaluator,
            invocation_prefix: invocation_prefix.trim().to_string(),
        }
    }

    fn render_dropdowns(
        &self,
        selects: &[SelectTemplate],
        rows: &[RowData],
        command: &str,
        selected: usize,
    ) -> Result<Vec<Select>, ExecutorError> {
        let mut dropdowns = Vec::with_capacity(selects.len());

        for select in selects {
            let mut options = Vec::with_capacity(rows.len());
            let mut initial_option = None;

            for (idx, row) in rows.iter().enumerate() {
                let key = self.evaluator.evaluate(&select.key_tpl, row)?;
                let key = key.trim();
                if key.is_empty() {
                    continue;
                }
                let option = OptionItem {
                    name: key.to_string(),
                    value: command::index_directive(idx),
                };
                if idx == selected {
                    initial_option = Some(option.clone());
                }
                options.push(option);
            }

            if options.is_empty() {
                debug!(select = select.name.as_str(), "Dropdown has no options, skipping");
                continue;
            }
            dropdowns.push(Select {
                name: select.name.clone(),
                command: command.to_string(),
                option_groups: vec![OptionGroup {
                    name: select.name.clone(),
                    options,
                }],
                initial_option,
            });
        }
        Ok(dropdowns)
    }

    fn render_preview(
        &self,
        parse_message: &ParseMessage,
        parsed: &TableOutput,
        row: &RowData,
        selected: usize,
    ) -> Result<Section, ExecutorError> {
        if !parse_message.preview.is_empty() {
            let preview = self.evaluator.evaluate(&parse_message.preview, row)?;
            return Ok(Section::code_block(preview));
        }

        let header = parsed.header_line().unwrap_or_default();
        let line = parsed
            .lines
            .get(selected + 1)
            .or_else(|| parsed.lines.get(1))
            .map(String::as_str)
            .unwrap_or_default();
        Ok(Section::code_block(format!("{}\n{}", header, line)))
    }

    fn render_actions(
        &self,
        actions: &BTreeMap<String, String>,
        row: &RowData,
        cmd: &Command,
    ) -> Result<Section, ExecutorError> {
        let mut options = Vec::with_capacity(actions.len());
        for (name, tpl) in actions {
            let rendered = self.evaluator.evaluate(tpl, row)?;
            let rendered = rendered.trim();
            if rendered.is_empty() {
                continue;
            }
            options.push(OptionItem {
                name: name.clone(),
                value: rendered.to_string(),
            });
        }

        let mut section = Section {
            buttons: vec![Button::for_command(
                RAW_OUTPUT_BUTTON,
                &format!("{} {}", cmd.to_execute, RAW_DIRECTIVE),
            )],
            ..Default::default()
        };
        if !options.is_empty() {
            section.selects.items.push(Select {
                name: ACTIONS_SELECT_NAME.to_string(),
                command: bot_command(&self.invocation_prefix),
                option_groups: vec![OptionGroup {
                    name: ACTIONS_SELECT_NAME.to_string(),
                    options,
                }],
                initial_option: None,
            });
        }
        Ok(section)
    }
}

impl Renderer for TableRenderer {
    fn render_message(
        &self,
        cmd: &Command,
        output: &str,
        state: &Container,
        template: &Template,
    ) -> Result<Message, ExecutorError> {
        let output = strip_ansi(output);
        let parsed = table_separated(&output);
        debug!(
            headers = parsed.table.headers.len(),
            rows = parsed.table.rows.len(),
            "Parsed table output"
        );
        if parsed.table.rows.is_empty() {
            return Ok(Message {
                only_visible_for_you: true,
                ..Message::plaintext(NOT_FOUND)
            });
        }

        let rows: Vec<RowData> = parsed
            .table
            .rows
            .iter()
            .map(|row| row_data(&parsed.table.headers, row))
            .collect();

        let select_command = bot_command(&cmd.to_execute);
        let selected = resolve_selected_index(state.field(&select_command), rows.len());
        let parse_message = &template.parse_message;

        let dropdowns =
            self.render_dropdowns(&parse_message.selects, &rows, &select_command, selected)?;
        let preview = self.render_preview(parse_message, &parsed, &rows[selected], selected)?;
        let actions = self.render_actions(&parse_message.actions, &rows[selected], cmd)?;

        let mut sections = Vec::with_capacity(3);
        if !dropdowns.is_empty() {
            sections.push(Section {
                selects: Selects {
                    id: state.selects_block_id().to_string(),
                    items: dropdowns,
                },
                ..Default::default()
            });
        }
        sections.push(preview);
        sections.push(actions);

        Ok(Message {
            sections,
            replace_original: !state.selects_block_id().is_empty(),
            only_visible_for_you: true,
        })
    }
}

/// Row picked by a previous `@idx:N` value, clamped into `0..row_count`.
///
/// Falls back to the first row when nothing was selected yet.
pub fn resolve_selected_index(previous: &str, row_count: usize) -> usize {
    let idx = command::parse_index(previous).unwrap_or(0);
    idx.min(row_count.saturating_sub(1))
}
