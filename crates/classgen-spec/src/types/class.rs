use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{AccessLevel, Backend, Modifier, Modifiers};

/// Description of a single class, as stored in a `*.class.json` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassSpec {
    /// Backend to render for when none is given by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Backend>,
    /// Class name
    pub name: String,
    /// Class-level access; the backend default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessLevel>,
    /// Class-level modifiers (`abstract`, `final`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    /// Methods in declaration order
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
}

/// A method member of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MethodSpec {
    pub name: String,
    #[serde(default = "default_return_type")]
    pub return_type: String,
    #[serde(default = "default_member_access")]
    pub access: AccessLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<StatementSpec>,
}

/// A statement inside a method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StatementSpec {
    /// Print `text` verbatim using the backend's output call
    Print { text: String },
}

fn default_return_type() -> String {
    "void".to_string()
}

fn default_member_access() -> AccessLevel {
    AccessLevel::Public
}

impl ClassSpec {
    /// Class modifiers folded into a flag set.
    pub fn modifier_flags(&self) -> Modifiers {
        self.modifiers.iter().copied().collect()
    }
}

impl MethodSpec {
    /// Method modifiers folded into a flag set.
    pub fn modifier_flags(&self) -> Modifiers {
        self.modifiers.iter().copied().collect()
    }
}
