mod rules;
mod validator;

use crate::error::ValidationError;
use crate::types::Graph;
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for Graph {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_graph(self)
    }
}

/// Check structural invariants and per-node configuration, collecting every violation.
pub fn validate_graph(graph: &Graph) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_graph(graph);
    v.finish()
}
