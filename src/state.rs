//! Interaction state
//!
//! Snapshot of the selections a user made in a previously rendered message,
//! rebuilt from the chat platform's action payload on every invocation. It is
//! a lookup of field values only; it never holds platform objects.

use crate::error::ExecutorError;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Fields of one block: field id to the field's value.
pub type BlockFields = BTreeMap<String, ActionValue>;

/// Raw action payload: block id, then field id, then the field's value.
///
/// Blocks keep the order in which they appear in the payload.
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    blocks: Vec<(String, BlockFields)>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block; a repeated id replaces the earlier block in place.
    pub fn insert(&mut self, block_id: impl Into<String>, fields: BlockFields) {
        let block_id = block_id.into();
        match self.blocks.iter_mut().find(|(id, _)| *id == block_id) {
            Some(existing) => existing.1 = fields,
            None => self.blocks.push((block_id, fields)),
        }
    }

    pub fn blocks(&self) -> impl Iterator<Item = (&str, &BlockFields)> {
        self.blocks.iter().map(|(id, fields)| (id.as_str(), fields))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl<'de> Deserialize<'de> for ActionState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ActionStateVisitor;

        impl<'de> Visitor<'de> for ActionStateVisitor {
            type Value = ActionState;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of block ids to field values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<ActionState, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut state = ActionState::new();
                while let Some((block_id, fields)) = map.next_entry::<String, BlockFields>()? {
                    state.insert(block_id, fields);
                }
                Ok(state)
            }
        }

        deserializer.deserialize_map(ActionStateVisitor)
    }
}

/// Value of one interactive field as reported by the platform.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionValue {
    #[serde(default)]
    pub selected_option: Option<SelectedOption>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectedOption {
    #[serde(default)]
    pub value: String,
}

/// Read-only view of previous UI selections.
///
/// `Container::default()` stands for "no prior interaction": every accessor
/// then returns an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    selects_block_id: String,
    fields: HashMap<String, String>,
}

impl Container {
    /// Build from a payload. A selected option's value takes precedence over
    /// free text; fields with neither are skipped. Dropdown blocks are singular,
    /// so when several blocks are present the last one in the payload is kept.
    pub fn from_action_state(state: &ActionState) -> Self {
        let mut container = Container::default();

        for (block_id, fields) in state.blocks() {
            container.selects_block_id = block_id.to_string();
            for (field_id, action) in fields {
                let value = action
                    .selected_option
                    .as_ref()
                    .map(|opt| opt.value.clone())
                    .or_else(|| action.value.clone());
                if let Some(value) = value {
                    container.fields.insert(field_id.clone(), value);
                }
            }
        }
        container
    }

    /// Parse a JSON payload. Blank input yields the empty container.
    pub fn from_json(payload: &str) -> Result<Self, ExecutorError> {
        if payload.trim().is_empty() {
            return Ok(Self::default());
        }
        let state: ActionState = serde_json::from_str(payload)?;
        Ok(Self::from_action_state(&state))
    }

    pub fn selects_block_id(&self) -> &str {
        &self.selects_block_id
    }

    /// Previous value of `name`, empty when the field was never set.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// No prior interaction was recorded.
    pub fn is_empty(&self) -> bool {
        self.selects_block_id.is_empty() && self.fields.is_empty()
    }
}
