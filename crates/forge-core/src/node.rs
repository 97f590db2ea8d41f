//! UI node trees.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Discriminant of a UI node.
///
/// Kinds outside the known vocabulary are kept as [`NodeKind::Other`] and
/// serialize back to their original string, so forward-versioned bundles
/// survive a load/store cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// Transparent root wrapper.
    Ui,
    /// Vertical stack.
    Column,
    /// Horizontal stack.
    Row,
    Text,
    Button,
    /// Any kind the current backends do not know.
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ui => "ui",
            Self::Column => "column",
            Self::Row => "row",
            Self::Text => "text",
            Self::Button => "button",
            Self::Other(kind) => kind,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for NodeKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "ui" => Self::Ui,
            "column" => Self::Column,
            "row" => Self::Row,
            "text" => Self::Text,
            "button" => Self::Button,
            _ => Self::Other(kind),
        }
    }
}

impl From<&str> for NodeKind {
    fn from(kind: &str) -> Self {
        Self::from(kind.to_string())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prop value attached to a UI node.
///
/// Props are expected to be scalars. Structured values are tolerated and
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Structured(serde_json::Value),
}

impl PropValue {
    /// Render the value as plain text, without JSON quoting.
    ///
    /// Returns `None` for `null`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Structured(value) => Some(value.to_string()),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or(Self::Null)
    }
}

/// A node in the UI tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiNode {
    /// Identifier assigned by the parser, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Node kind, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Backend-agnostic semantic attributes (`content`, `label`, `action`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub props: IndexMap<String, PropValue>,
    /// Ordered children; order is preserved in emitted layout.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<UiNode>,
}

impl UiNode {
    /// Create a node with no props and no children.
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            props: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Add a prop.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: UiNode) -> Self {
        self.children.push(child);
        self
    }

    /// Get a prop value.
    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    /// Get a prop rendered as plain text.
    pub fn prop_text(&self, key: &str) -> Option<String> {
        self.prop(key).and_then(PropValue::as_text)
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(UiNode::node_count).sum::<usize>()
    }

    /// Kinds in this subtree that backends will render as placeholders,
    /// in depth-first order without duplicates.
    pub fn unsupported_kinds(&self) -> Vec<&str> {
        let mut kinds = Vec::new();
        self.collect_unsupported(&mut kinds);
        kinds
    }

    fn collect_unsupported<'a>(&'a self, kinds: &mut Vec<&'a str>) {
        if !self.kind.is_supported() && !kinds.contains(&self.kind.as_str()) {
            kinds.push(self.kind.as_str());
        }
        for child in &self.children {
            child.collect_unsupported(kinds);
        }
    }

    /// A tree is well-formed when every node's kind is in the supported
    /// vocabulary.
    pub fn is_well_formed(&self) -> bool {
        self.kind.is_supported() && self.children.iter().all(UiNode::is_well_formed)
    }
}

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
