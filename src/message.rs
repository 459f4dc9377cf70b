//! Rendered message model
//!
//! Platform-neutral description of an interactive chat message. The chat
//! layer translates it into Slack/Teams blocks; this crate only builds it.

use serde::{Deserialize, Serialize};

/// Placeholder the chat layer replaces with the bot's mention name.
pub const BOT_NAME_PLACEHOLDER: &str = "{{BotName}}";

/// Prefix `command` with the bot-name placeholder so the platform re-routes it to us.
pub fn bot_command(command: &str) -> String {
    format!("{} {}", BOT_NAME_PLACEHOLDER, command.trim())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub replace_original: bool,
    #[serde(default)]
    pub only_visible_for_you: bool,
}

impl Message {
    /// Single section holding `text` as a code block.
    pub fn code_block(text: impl Into<String>) -> Self {
        Self {
            sections: vec![Section::code_block(text)],
            ..Default::default()
        }
    }

    /// Single section holding `text` as plain text.
    pub fn plaintext(text: impl Into<String>) -> Self {
        Self {
            sections: vec![Section {
                base: Base {
                    body: Body {
                        plaintext: text.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// No section carries dropdowns or buttons.
    pub fn is_static(&self) -> bool {
        self.sections
            .iter()
            .all(|s| s.selects.items.is_empty() && s.buttons.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Base::is_empty")]
    pub base: Base,
    #[serde(default, skip_serializing_if = "Selects::is_empty")]
    pub selects: Selects,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

impl Section {
    pub fn code_block(text: impl Into<String>) -> Self {
        Self {
            base: Base {
                body: Body {
                    code_block: text.into(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self {
            base: Base {
                header: text.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub header: String,
    #[serde(default, skip_serializing_if = "Body::is_empty")]
    pub body: Body,
}

impl Base {
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.body.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plaintext: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code_block: String,
}

impl Body {
    pub fn is_empty(&self) -> bool {
        self.plaintext.is_empty() && self.code_block.is_empty()
    }
}

/// A block of dropdowns. `id` correlates the block with future interaction state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selects {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub items: Vec<Select>,
}

impl Selects {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.items.is_empty()
    }
}

/// A dropdown. Choosing an option sends `command` followed by the option's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub option_groups: Vec<OptionGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_option: Option<OptionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub name: String,
    #[serde(default)]
    pub options: Vec<OptionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Default,
    Primary,
    Danger,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub name: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub style: ButtonStyle,
}

impl Button {
    /// Button that re-issues `command` through the bot.
    pub fn for_command(name: impl Into<String>, command: &str) -> Self {
        Self {
            name: name.into(),
            command: bot_command(command),
            ..Default::default()
        }
    }
}
