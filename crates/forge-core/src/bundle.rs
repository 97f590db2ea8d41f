//! The semantic bundle: the unit of exchange between the parser stage and
//! every backend.
//!
//! Only `ui.components` is required. The other sections are decoded leniently:
//! a missing or malformed section becomes an empty one and is reported with a
//! warning, so a partially populated or forward-versioned bundle never blocks
//! lowering.

use crate::errors::{BundleError, Result};
use crate::node::UiNode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// The canonical intermediate representation of a UI description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticBundle {
    pub ui: UiSection,
    /// Reserved for data binding; not read by any backend.
    #[serde(default)]
    pub state: StateSection,
    /// Reserved for action-graph metadata; backends only read `props.action`.
    #[serde(default)]
    pub action: ActionSection,
    /// Reserved styling metadata; not read by any backend.
    #[serde(default)]
    pub design: DesignSection,
    /// Top-level sections this version does not know about.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The UI tree section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSection {
    /// Root nodes, in order.
    pub components: Vec<UiNode>,
    /// Opaque layout hint record.
    #[serde(default = "empty_object")]
    pub layout: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSection {
    pub entities: Vec<Value>,
    pub relationships: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSection {
    pub actions: Vec<Value>,
    pub flows: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSection {
    pub theme: Value,
    pub tokens: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for DesignSection {
    fn default() -> Self {
        Self {
            theme: empty_object(),
            tokens: empty_object(),
            extra: Map::new(),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl SemanticBundle {
    /// Create a bundle holding the given roots and empty auxiliary sections.
    pub fn new(components: Vec<UiNode>) -> Self {
        Self {
            ui: UiSection {
                components,
                layout: empty_object(),
                extra: Map::new(),
            },
            state: StateSection::default(),
            action: ActionSection::default(),
            design: DesignSection::default(),
            extra: Map::new(),
        }
    }

    /// Load and validate a bundle file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_value(read_raw(path)?)
    }

    /// Parse and validate a bundle from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Validate a parsed JSON document as a bundle.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(BundleError::malformed("bundle root is not an object"));
        };

        let ui = match root.remove("ui") {
            Some(Value::Object(ui)) => decode_ui(ui)?,
            Some(_) => return Err(BundleError::malformed("`ui` is not an object")),
            None => return Err(BundleError::malformed("missing `ui` section")),
        };

        Ok(Self {
            ui,
            state: lenient_section(root.remove("state"), "state"),
            action: lenient_section(root.remove("action"), "action"),
            design: lenient_section(root.remove("design"), "design"),
            extra: root,
        })
    }

    /// Root nodes of the UI tree.
    pub fn roots(&self) -> &[UiNode] {
        &self.ui.components
    }

    /// Serialize as two-space indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the bundle to `path`, creating parent directories.
    ///
    /// This is the parser-side operation; backends and the inspector never
    /// call it.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// Read a bundle file as an untyped JSON document, without validation.
pub fn read_raw(path: &Path) -> Result<Value> {
    if !path.is_file() {
        return Err(BundleError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn decode_ui(mut ui: Map<String, Value>) -> Result<UiSection> {
    let components = match ui.remove("components") {
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<UiNode>(item).map_err(|err| {
                    BundleError::Malformed(format!("ui.components[{index}]: {err}"))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        Some(_) => return Err(BundleError::malformed("`ui.components` is not a sequence")),
        None => return Err(BundleError::malformed("missing `ui.components`")),
    };

    let layout = match ui.remove("layout") {
        None | Some(Value::Null) => empty_object(),
        Some(layout) => layout,
    };

    Ok(UiSection {
        components,
        layout,
        extra: ui,
    })
}

fn lenient_section<T: DeserializeOwned + Default>(value: Option<Value>, section: &str) -> T {
    match value {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
            tracing::warn!(section, %err, "treating malformed bundle section as empty");
            T::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use serde_json::json;

    fn inspector_bundle() -> Value {
        json!({
            "ui": {
                "components": [{
                    "id": "component_0",
                    "type": "column",
                    "props": {},
                    "children": [
                        { "id": "component_1", "type": "text", "props": { "content": "Hello Inspector" } },
                        { "id": "component_2", "type": "button", "props": { "label": "Click", "action": "onClick" } }
                    ]
                }],
                "layout": { "type": "flex", "direction": "column" }
            },
            "state": { "entities": [], "relationships": [] },
            "action": { "actions": [], "flows": [] },
            "design": {
                "theme": { "name": "", "colors": {}, "spacing": {} },
                "tokens": { "colors": {}, "spacing": {}, "borderRadius": {}, "shadows": {} }
            }
        })
    }

    #[test]
    fn test_load_full_bundle() {
        let bundle = SemanticBundle::from_value(inspector_bundle()).unwrap();
        assert_eq!(bundle.roots().len(), 1);
        assert_eq!(bundle.roots()[0].kind, NodeKind::Column);
        assert_eq!(bundle.ui.layout["direction"], "column");
        assert_eq!(bundle.design.tokens["borderRadius"], json!({}));
    }

    #[test]
    fn test_round_trip_preserves_sections() {
        let value = json!({
            "ui": { "components": [{ "type": "text", "props": { "content": "Hi" } }], "layout": {} },
            "state": { "entities": [{ "name": "User" }], "relationships": [], "version": 2 },
            "action": { "actions": ["save"], "flows": [] },
            "design": { "theme": { "name": "dark" }, "tokens": {} },
            "meta": { "generator": "forge-web-builder" }
        });

        let bundle = SemanticBundle::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&bundle).unwrap(), value);
    }

    #[test]
    fn test_missing_optional_sections_are_empty() {
        let bundle = SemanticBundle::from_json_str(r#"{"ui":{"components":[]}}"#).unwrap();
        assert!(bundle.state.entities.is_empty());
        assert!(bundle.action.flows.is_empty());
        assert_eq!(bundle.design.theme, json!({}));
        assert_eq!(bundle.ui.layout, json!({}));
    }

    #[test]
    fn test_malformed_optional_sections_do_not_block() {
        let bundle = SemanticBundle::from_value(json!({
            "ui": { "components": [{ "type": "text" }] },
            "state": "not a record",
            "action": { "actions": 7 },
            "design": null
        }))
        .unwrap();

        assert_eq!(bundle.roots().len(), 1);
        assert_eq!(bundle.state, StateSection::default());
        assert_eq!(bundle.action, ActionSection::default());
    }

    #[test]
    fn test_components_are_required() {
        let err = SemanticBundle::from_value(json!({ "ui": {} })).unwrap_err();
        assert!(matches!(err, BundleError::Malformed(_)));

        let err = SemanticBundle::from_value(json!({ "ui": { "components": {} } })).unwrap_err();
        assert!(err.to_string().contains("not a sequence"));

        let err = SemanticBundle::from_value(json!({ "state": {} })).unwrap_err();
        assert!(err.to_string().contains("missing `ui`"));

        let err = SemanticBundle::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, BundleError::Malformed(_)));
    }

    #[test]
    fn test_bad_node_reports_index() {
        let err = SemanticBundle::from_value(json!({
            "ui": { "components": [{ "type": "text" }, { "props": {} }] }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("ui.components[1]"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("semantic.json");
        let err = SemanticBundle::load(&path).unwrap_err();
        assert!(matches!(err, BundleError::NotFound(_)));
        assert!(err.to_string().contains("semantic bundle not found"));
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".forge/semantic/semantic.json");
        let bundle = SemanticBundle::new(vec![UiNode::new("text").with_prop("content", "Hi")]);

        bundle.write_to(&path).unwrap();
        assert_eq!(SemanticBundle::load(&path).unwrap(), bundle);
    }
}
