/// Free-form per-node configuration bag, interpreted according to the node kind.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Canvas coordinates carried through from the editor; ignored by execution.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}
