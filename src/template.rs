//! Render templates
//!
//! A template binds a command prefix (its trigger) to a rendering strategy
//! and that strategy's parameters. Templates are loaded as an ordered set per
//! invocation; the first one whose trigger prefixes the executed command wins.

use crate::message::Button;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod source;

pub use source::{parse_templates, FileTemplateSource, TemplateSource};

/// Type prefix shared by all table-parsing templates, e.g. `parser:table:space`.
pub const TABLE_TYPE_PREFIX: &str = "parser:table:";
/// Type of paginated button menus.
pub const TUTORIAL_TYPE: &str = "tutorial";
/// Type of raw-output passthrough templates.
pub const WRAPPER_TYPE: &str = "wrapper";

/// Rendering strategy declared by a template's type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateKind {
    /// `parser:table:<flavor>`
    Table(String),
    Tutorial,
    Wrapper,
    /// Anything else; resolved through the registry's pattern keys.
    Custom(String),
}

impl TemplateKind {
    pub fn from_type(template_type: &str) -> Self {
        if let Some(flavor) = template_type.strip_prefix(TABLE_TYPE_PREFIX) {
            return TemplateKind::Table(flavor.to_string());
        }
        match template_type {
            TUTORIAL_TYPE => TemplateKind::Tutorial,
            WRAPPER_TYPE => TemplateKind::Wrapper,
            other => TemplateKind::Custom(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(default)]
    pub command: String,
}

/// A row dropdown: `key_tpl` renders the label shown for each row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    pub name: String,
    #[serde(rename = "keyTpl")]
    pub key_tpl: String,
}

/// Parameters of `parser:table:*` templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseMessage {
    #[serde(default)]
    pub selects: Vec<Select>,
    /// Action name to command template, rendered against the selected row.
    #[serde(default)]
    pub actions: BTreeMap<String, String>,
    #[serde(default)]
    pub preview: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginate {
    /// Buttons per page; zero means the configured default.
    #[serde(default)]
    pub page: usize,
}

/// Parameters of `tutorial` templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialMessage {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub buttons: Vec<Button>,
    #[serde(default)]
    pub paginate: Paginate,
}

/// Parameters of `wrapper` templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperMessage {
    #[serde(default)]
    pub buttons: Vec<Button>,
}

/// A loaded template. Only the message block matching its kind is populated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "TemplateDefinition")]
pub struct Template {
    pub template_type: String,
    pub trigger: Trigger,
    pub parse_message: ParseMessage,
    pub tutorial_message: TutorialMessage,
    pub wrapper_message: WrapperMessage,
    /// Undecoded message payload, kept for custom renderers.
    pub message: serde_yaml::Value,
}

/// On-disk shape of a template.
#[derive(Debug, Deserialize)]
struct TemplateDefinition {
    #[serde(rename = "type")]
    template_type: String,
    #[serde(default)]
    trigger: Trigger,
    #[serde(default)]
    message: serde_yaml::Value,
}

impl TryFrom<TemplateDefinition> for Template {
    type Error = serde_yaml::Error;

    fn try_from(def: TemplateDefinition) -> Result<Self, Self::Error> {
        let mut template = Template {
            template_type: def.template_type,
            trigger: def.trigger,
            ..Default::default()
        };
        let payload = if def.message.is_null() {
            serde_yaml::Value::Mapping(Default::default())
        } else {
            def.message
        };

        match template.kind() {
            TemplateKind::Table(_) => {
                template.parse_message = serde_yaml::from_value(payload.clone())?;
            }
            TemplateKind::Tutorial => {
                template.tutorial_message = serde_yaml::from_value(payload.clone())?;
            }
            TemplateKind::Wrapper => {
                template.wrapper_message = serde_yaml::from_value(payload.clone())?;
            }
            TemplateKind::Custom(_) => {}
        }
        template.message = payload;
        Ok(template)
    }
}

impl Template {
    pub fn kind(&self) -> TemplateKind {
        TemplateKind::from_type(&self.template_type)
    }
}

/// Top-level layout of a template file.
#[derive(Debug, Default, Deserialize)]
pub struct TemplateFile {
    #[serde(default)]
    pub templates: Vec<Template>,
}

/// First template, in configured order, whose non-empty trigger prefixes `command`.
///
/// No specificity ranking is applied: order the set most-specific first.
pub fn find_with_prefix<'a>(templates: &'a [Template], command: &str) -> Option<&'a Template> {
    templates.iter().find(|tpl| {
        !tpl.trigger.command.is_empty() && command.starts_with(tpl.trigger.command.as_str())
    })
}
