//! Passthrough renderer: raw output in a code block plus static buttons.

use crate::ansi::strip_ansi;
use crate::command::Command;
use crate::error::ExecutorError;
use crate::message::{bot_command, Button, Message, Section};
use crate::renderer::Renderer;
use crate::state::Container;
use crate::template::Template;

#[derive(Default)]
pub struct WrapperRenderer;

impl WrapperRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for WrapperRenderer {
    fn render_message(
        &self,
        _cmd: &Command,
        output: &str,
        _state: &Container,
        template: &Template,
    ) -> Result<Message, ExecutorError> {
        let buttons: Vec<Button> = template
            .wrapper_message
            .buttons
            .iter()
            .map(|btn| Button {
                command: bot_command(&btn.command),
                ..btn.clone()
            })
            .collect();

        let mut sections = vec![Section::code_block(strip_ansi(output))];
        if !buttons.is_empty() {
            sections.push(Section {
                buttons,
                ..Default::default()
            });
        }
        Ok(Message {
            sections,
            ..Default::default()
        })
    }
}
