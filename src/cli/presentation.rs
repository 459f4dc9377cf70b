//! CLI presentation: text and json formatters per command family.

mod message;
mod shared;
mod table;
mod templates;

pub use message::{format_message_json, format_message_text};
pub use shared::{format_config_toml, format_section_heading};
pub use table::format_table;
pub use templates::{format_templates_json, format_templates_text};
