use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level entry of a seed file: `{"name": .., "value": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedNode {
    pub name: String,
    /// Opaque upstream id, never parsed.
    pub value: String,
}

impl SeedNode {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A child returned by the upstream at any level below the seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Node {
    /// A bare string is a name-only node; an object keeps its `name` and `id`.
    /// `None` for anything else.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self {
                id: None,
                name: Some(name.clone()),
            }),
            Value::Object(fields) => Some(Self {
                id: fields.get("id").and_then(token),
                name: fields.get("name").and_then(token),
            }),
            _ => None,
        }
    }
}

/// Ids are opaque: strings as they are, any other non-null value in its JSON form.
fn token(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// One seed with whatever children could be fetched for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEntry<C> {
    pub code: String,
    pub name: String,
    /// Empty, never absent, when the upstream gave nothing.
    pub children: Vec<C>,
}

impl<C> TreeEntry<C> {
    pub fn empty(seed: &SeedNode) -> Self {
        Self {
            code: seed.value.clone(),
            name: seed.name.clone(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub model_name: Option<String>,
    pub model_id: Option<String>,
    pub body_styles: Vec<Value>,
    pub years: Vec<Value>,
}

impl ModelEntry {
    pub fn new(model: Node) -> Self {
        Self {
            model_name: model.name,
            model_id: model.id,
            body_styles: Vec::new(),
            years: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn node_ignores_extra_fields_and_missing_id() {
        let node = Node::from_value(&json!({"id": "7", "name": "Vios", "code": "V"})).unwrap();
        assert_eq!(node.id.as_deref(), Some("7"));
        assert_eq!(node.name.as_deref(), Some("Vios"));

        let node = Node::from_value(&json!({"name": "Vios", "id": null})).unwrap();
        assert_eq!(node.id, None);
    }

    #[test]
    fn node_accepts_bare_names_and_numeric_ids() {
        assert_eq!(
            Node::from_value(&json!("Vios")),
            Some(Node {
                id: None,
                name: Some("Vios".into())
            })
        );
        let node = Node::from_value(&json!({"id": 42, "name": "Camry"})).unwrap();
        assert_eq!(node.id.as_deref(), Some("42"));

        let node = Node::from_value(&json!({"id": "7"})).unwrap();
        assert_eq!(node.name, None);
    }

    #[test]
    fn node_rejects_other_shapes() {
        assert_eq!(Node::from_value(&json!(42)), None);
        assert_eq!(Node::from_value(&json!(null)), None);
        assert_eq!(Node::from_value(&json!(["Vios"])), None);
    }

    #[test]
    fn empty_entry_serializes_children_as_array() {
        let seed = SeedNode::new("A", "1");
        let entry: TreeEntry<ModelEntry> = TreeEntry::empty(&seed);
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"code": "1", "name": "A", "children": []})
        );
    }

    #[test]
    fn seed_file_shape() {
        let seeds: Vec<SeedNode> =
            serde_json::from_str(r#"[{"name":"Toyota","value":"t-1"},{"name":"Kia","value":"k-2"}]"#)
                .unwrap();
        assert_eq!(seeds, vec![SeedNode::new("Toyota", "t-1"), SeedNode::new("Kia", "k-2")]);
    }
}
