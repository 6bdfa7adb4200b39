use crate::types::EdgeDocument;

pub const HANDLE_TRUE: &str = "true";
pub const HANDLE_FALSE: &str = "false";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    /// Branch tag on edges leaving a condition node. `None` means "always follow".
    pub source_handle: Option<String>,
    pub label: Option<String>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            source_handle: None,
            label: None,
        }
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.source_handle = Some(handle.into());
        self
    }

    /// Whether a condition node with outcome `condition_met` should follow this edge.
    pub fn follows_outcome(&self, condition_met: bool) -> bool {
        match self.source_handle.as_deref() {
            None => true,
            Some(HANDLE_TRUE) => condition_met,
            Some(HANDLE_FALSE) => !condition_met,
            Some(_) => false,
        }
    }
}

impl From<EdgeDocument> for Edge {
    fn from(doc: EdgeDocument) -> Self {
        Self {
            id: doc.id,
            source: doc.source,
            target: doc.target,
            source_handle: doc.source_handle,
            label: doc.label,
        }
    }
}
