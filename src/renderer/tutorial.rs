//! Paginated button menu. Ignores command output entirely.

use crate::command::{page_directive, Command};
use crate::error::ExecutorError;
use crate::message::{bot_command, Button, Message, Section};
use crate::renderer::Renderer;
use crate::state::Container;
use crate::template::Template;

pub const PREV_BUTTON: &str = "Prev";
pub const NEXT_BUTTON: &str = "Next";

pub struct TutorialRenderer {
    default_page_size: usize,
}

impl TutorialRenderer {
    /// `default_page_size` applies to templates that leave `paginate.page` unset.
    pub fn new(default_page_size: usize) -> Self {
        Self {
            default_page_size: default_page_size.max(1),
        }
    }

    fn paginate(&self, cmd: &Command, page: usize, page_size: usize, total: usize) -> Section {
        let last_page = total.saturating_sub(1) / page_size;
        let stop = page.saturating_mul(page_size).saturating_add(page_size);
        let mut buttons = Vec::new();

        if page > 0 {
            let prev = (page - 1).min(last_page);
            buttons.push(Button::for_command(
                PREV_BUTTON,
                &format!("{} {}", cmd.to_execute, page_directive(prev)),
            ));
        }
        if stop < total {
            buttons.push(Button::for_command(
                NEXT_BUTTON,
                &format!("{} {}", cmd.to_execute, page_directive(page + 1)),
            ));
        }
        Section {
            buttons,
            ..Default::default()
        }
    }
}

impl Renderer for TutorialRenderer {
    fn render_message(
        &self,
        cmd: &Command,
        _output: &str,
        _state: &Container,
        template: &Template,
    ) -> Result<Message, ExecutorError> {
        let tutorial = &template.tutorial_message;
        let page_size = match tutorial.paginate.page {
            0 => self.default_page_size,
            n => n,
        };
        let total = tutorial.buttons.len();
        let start = cmd.page_index.saturating_mul(page_size).min(total);
        let stop = start.saturating_add(page_size).min(total);

        let mut sections = Vec::with_capacity(stop - start + 2);
        if !tutorial.header.is_empty() {
            sections.push(Section::header(tutorial.header.clone()));
        }
        for btn in &tutorial.buttons[start..stop] {
            sections.push(Section {
                buttons: vec![Button {
                    command: bot_command(&btn.command),
                    ..btn.clone()
                }],
                ..Default::default()
            });
        }

        let pagination = self.paginate(cmd, cmd.page_index, page_size, total);
        if !pagination.buttons.is_empty() {
            sections.push(pagination);
        }

        Ok(Message {
            sections,
            replace_original: cmd.page_index > 0,
            only_visible_for_you: true,
        })
    }
}
