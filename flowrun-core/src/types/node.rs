use std::fmt;

use crate::types::{Metadata, NodeDocument, Position};

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Start,
    Form,
    Integration,
    Condition,
    Email,
    End,
    /// Any tag this engine has no handler for. Executes as a no-op.
    Unknown(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Start => "start",
            NodeKind::Form => "form",
            NodeKind::Integration => "integration",
            NodeKind::Condition => "condition",
            NodeKind::Email => "email",
            NodeKind::End => "end",
            NodeKind::Unknown(tag) => tag,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        match tag {
            "start" => NodeKind::Start,
            "form" => NodeKind::Form,
            "integration" => NodeKind::Integration,
            "condition" => NodeKind::Condition,
            "email" => NodeKind::Email,
            "end" => NodeKind::End,
            other => NodeKind::Unknown(other.to_string()),
        }
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        NodeKind::from(tag.as_str())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single workflow step as seen by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub label: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<Metadata>,
    pub position: Option<Position>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            label: None,
            description: None,
            metadata: None,
            position: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach metadata. Non-object values are ignored, matching how documents without an
    /// object-shaped `metadata` are loaded.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = metadata {
            self.metadata = Some(map);
        }
        self
    }
}

impl From<NodeDocument> for Node {
    fn from(doc: NodeDocument) -> Self {
        let data = doc.data.unwrap_or_default();
        Self {
            id: doc.id,
            kind: NodeKind::from(doc.node_type),
            label: data.label,
            description: data.description,
            metadata: data.metadata,
            position: doc.position,
        }
    }
}
