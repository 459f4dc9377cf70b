//! Renderers
//!
//! A renderer turns one command's output into a [`Message`] according to a
//! template. The built-in strategies are the interactive table renderer, the
//! paginated tutorial menu and the raw-output wrapper; the registry maps a
//! template's declared type to one of them.

use crate::command::Command;
use crate::error::ExecutorError;
use crate::message::Message;
use crate::state::Container;
use crate::template::Template;

pub mod evaluator;
pub mod registry;
pub mod table;
pub mod tutorial;
pub mod wrapper;

pub use evaluator::{row_data, to_lower_camel, Evaluator, HandlebarsEvaluator, RowData};
pub use registry::{
    RendererRegistry, TABLE_RENDERER_KEY, TUTORIAL_RENDERER_KEY, WRAPPER_RENDERER_KEY,
};
pub use table::TableRenderer;
pub use tutorial::TutorialRenderer;
pub use wrapper::WrapperRenderer;

/// Rendering strategy for one template type.
///
/// Implementations must not return a partially built message: any failure
/// aborts the whole render.
pub trait Renderer: Send + Sync {
    fn render_message(
        &self,
        cmd: &Command,
        output: &str,
        state: &Container,
        template: &Template,
    ) -> Result<Message, ExecutorError>;
}
