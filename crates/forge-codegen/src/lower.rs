//! Node lowering engine.
//!
//! One tree walk serves every backend. The walk dispatches on the node kind
//! and asks the backend's [`Dialect`] for the leaf text and container
//! openers; composition of children (ordering, indentation, joining) is
//! shared.

use forge_core::{NodeKind, UiNode};
use std::fmt;

/// Label used for a button without a `label` prop.
pub const DEFAULT_BUTTON_LABEL: &str = "Button";

/// Prefix of the placeholder rendered for unknown node kinds.
pub const UNKNOWN_COMPONENT_PREFIX: &str = "Unknown component: ";

/// Token table of one target framework.
///
/// Template functions receive values already escaped with [`Dialect::escape`].
pub struct Dialect {
    pub name: &'static str,
    /// One level of indentation inside a container.
    pub indent: &'static str,
    /// Opener of the vertical stacking construct (`VStack`, `Column`).
    pub vertical: &'static str,
    /// Opener of the horizontal stacking construct (`HStack`, `Row`).
    pub horizontal: &'static str,
    /// Action embedded in a button that has no `action` prop.
    pub default_action: &'static str,
    /// Escape text for use inside a string literal.
    pub escape: fn(&str) -> String,
    /// Text leaf from its content.
    pub text: fn(&str) -> String,
    /// Button leaf from its label and action identifier.
    pub button: fn(&str, &str) -> String,
}

impl fmt::Debug for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialect")
            .field("name", &self.name)
            .field("vertical", &self.vertical)
            .field("horizontal", &self.horizontal)
            .finish_non_exhaustive()
    }
}

/// Lowered target source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFragment(String);

impl SourceFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SourceFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SourceFragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lower one node and its subtree.
///
/// Never fails: unknown kinds lower to a visible placeholder. Output is a
/// pure function of `node` and `dialect`.
pub fn lower(node: &UiNode, dialect: &Dialect) -> SourceFragment {
    SourceFragment(lower_node(node, dialect))
}

/// Lower several nodes as the children of one vertical container.
pub fn lower_stack(nodes: &[UiNode], dialect: &Dialect) -> SourceFragment {
    SourceFragment(container(dialect.vertical, nodes, dialect))
}

fn lower_node(node: &UiNode, dialect: &Dialect) -> String {
    let escape = dialect.escape;
    match &node.kind {
        NodeKind::Text => {
            let content = node.prop_text("content").unwrap_or_default();
            (dialect.text)(&escape(&content))
        }
        NodeKind::Button => {
            let label = non_empty_prop(node, "label")
                .unwrap_or_else(|| DEFAULT_BUTTON_LABEL.to_string());
            let action = non_empty_prop(node, "action")
                .unwrap_or_else(|| dialect.default_action.to_string());
            (dialect.button)(&escape(&label), &escape(&action))
        }
        NodeKind::Column => container(dialect.vertical, &node.children, dialect),
        NodeKind::Row => container(dialect.horizontal, &node.children, dialect),
        NodeKind::Ui => match node.children.as_slice() {
            [only] => lower_node(only, dialect),
            children => container(dialect.vertical, children, dialect),
        },
        NodeKind::Other(kind) => {
            (dialect.text)(&escape(&format!("{UNKNOWN_COMPONENT_PREFIX}{kind}")))
        }
    }
}

fn non_empty_prop(node: &UiNode, key: &str) -> Option<String> {
    node.prop_text(key).filter(|value| !value.is_empty())
}

fn container(opener: &str, children: &[UiNode], dialect: &Dialect) -> String {
    let mut out = format!("{opener} {{\n");
    for child in children {
        for line in lower_node(child, dialect).lines() {
            if !line.is_empty() {
                out.push_str(dialect.indent);
                out.push_str(line);
            }
            out.push('\n');
        }
    }
    out.push('}');
    out
}

/// Escape for a double-quoted string literal shared by Swift and Kotlin.
///
/// Control characters without a short escape go through `unicode`, so the
/// output never contains a raw control character.
pub(crate) fn escape_literal(text: &str, unicode: fn(char) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => out.push_str(&unicode(ch)),
            other => out.push(other),
        }
    }
    out
}
