use crate::types::RecordKind;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InputField
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Data,
    SmallText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    pub field_name: String,
    pub label: String,
    pub input_kind: InputKind,
}

impl InputField {
    pub fn new(field_name: &str, label: &str, input_kind: InputKind) -> Self {
        Self {
            field_name: field_name.to_string(),
            label: label.to_string(),
            input_kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Confirmation
// ---------------------------------------------------------------------------

/// The user-interaction step that runs before an action's effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Confirmation {
    /// Yes/no question.
    Confirm { message: String },
    /// Collect input fields; their values become the procedure parameters.
    Prompt {
        title: String,
        fields: Vec<InputField>,
    },
}

// ---------------------------------------------------------------------------
// ActionEffect
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionEffect {
    Invoke { procedure: String },
    OpenUrl { url: String },
    OpenRecord { kind: RecordKind, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleHint {
    Primary,
}

// ---------------------------------------------------------------------------
// ActionDescriptor
// ---------------------------------------------------------------------------

/// One user-triggerable action, derived from a record snapshot by the rule
/// table. Descriptors are values: rebuilt on every evaluation, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
    pub effect: ActionEffect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_hint: Option<StyleHint>,
    /// Transient notification shown after the procedure succeeds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
}

impl ActionDescriptor {
    pub fn invoke(name: &str, label: &str, procedure: &str) -> Self {
        Self::with_effect(
            name,
            label,
            ActionEffect::Invoke {
                procedure: procedure.to_string(),
            },
        )
    }

    pub fn open_url(name: &str, label: &str, url: &str) -> Self {
        Self::with_effect(name, label, ActionEffect::OpenUrl { url: url.to_string() })
    }

    pub fn open_record(name: &str, label: &str, kind: RecordKind, record: &str) -> Self {
        Self::with_effect(
            name,
            label,
            ActionEffect::OpenRecord {
                kind,
                name: record.to_string(),
            },
        )
    }

    fn with_effect(name: &str, label: &str, effect: ActionEffect) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            group: None,
            confirmation: None,
            effect,
            style_hint: None,
            success_message: None,
        }
    }

    pub fn in_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn confirm(mut self, message: &str) -> Self {
        self.confirmation = Some(Confirmation::Confirm {
            message: message.to_string(),
        });
        self
    }

    pub fn prompt(mut self, title: &str, fields: Vec<InputField>) -> Self {
        self.confirmation = Some(Confirmation::Prompt {
            title: title.to_string(),
            fields,
        });
        self
    }

    pub fn primary(mut self) -> Self {
        self.style_hint = Some(StyleHint::Primary);
        self
    }

    pub fn on_success(mut self, message: &str) -> Self {
        self.success_message = Some(message.to_string());
        self
    }

    pub fn requires_confirmation(&self) -> bool {
        self.confirmation.is_some()
    }

    /// Name of the server-side procedure, for invoking actions.
    pub fn remote_procedure(&self) -> Option<&str> {
        match &self.effect {
            ActionEffect::Invoke { procedure } => Some(procedure.as_str()),
            _ => None,
        }
    }

    pub fn input_fields(&self) -> &[InputField] {
        match &self.confirmation {
            Some(Confirmation::Prompt { fields, .. }) => fields.as_slice(),
            _ => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
