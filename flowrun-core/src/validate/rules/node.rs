use crate::types::{EmailConfig, FormConfig, Graph, IntegrationConfig, NodeKind};
use crate::validate::validator::Validator;

pub(crate) fn validate_nodes(v: &mut Validator, graph: &Graph) {
    for (idx, n) in graph.nodes().iter().enumerate() {
        let path = format!("nodes[{idx}]");
        let metadata = n.metadata.as_ref();

        let result = match &n.kind {
            NodeKind::Form => FormConfig::from_metadata(metadata).map(|_| ()),
            NodeKind::Integration => IntegrationConfig::from_metadata(metadata).map(|_| ()),
            NodeKind::Email => EmailConfig::from_metadata(metadata).map(|_| ()),
            NodeKind::Start | NodeKind::Condition | NodeKind::End => Ok(()),
            NodeKind::Unknown(tag) => {
                v.push(format!("{path}.type"), format!("unsupported node type '{tag}'"));
                Ok(())
            }
        };

        if let Err(e) = result {
            v.push(format!("{path}.data.metadata"), e.to_string());
        }
    }
}
