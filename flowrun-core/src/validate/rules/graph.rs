use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use crate::types::{Graph, NodeKind, HANDLE_FALSE, HANDLE_TRUE};
use crate::validate::validator::Validator;

pub(crate) fn validate_structure(v: &mut Validator, graph: &Graph) {
    let starts = graph.start_nodes().count();
    if starts == 0 {
        v.push("nodes", "no start node found in workflow");
    } else if starts > 1 {
        v.push("nodes", format!("must have exactly one start node (found {starts})"));
    }

    let mut ids = HashSet::<&str>::new();
    for (idx, n) in graph.nodes().iter().enumerate() {
        if n.id.is_empty() {
            v.push(format!("nodes[{idx}].id"), "must not be empty");
        }
        if !ids.insert(n.id.as_str()) {
            v.push(format!("nodes[{idx}].id"), "must be unique within the workflow");
        }
    }

    for (idx, e) in graph.edges().iter().enumerate() {
        let path = format!("edges[{idx}]");
        if !graph.contains(&e.source) {
            v.push(format!("{path}.source"), format!("references unknown node '{}'", e.source));
        }
        if !graph.contains(&e.target) {
            v.push(format!("{path}.target"), format!("references unknown node '{}'", e.target));
        }

        let Some(handle) = e.source_handle.as_deref() else {
            continue;
        };
        match graph.node(&e.source).map(|n| &n.kind) {
            Some(NodeKind::Condition) => {
                if handle != HANDLE_TRUE && handle != HANDLE_FALSE {
                    v.push(
                        format!("{path}.sourceHandle"),
                        "must be \"true\" or \"false\" on edges leaving a condition node",
                    );
                }
            }
            Some(_) => v.push(
                format!("{path}.sourceHandle"),
                "only edges leaving a condition node may carry a handle",
            ),
            None => {}
        }
    }

    if let Some(cycle_nodes) = find_cycle(graph) {
        v.push(
            "edges",
            format!("cycle detected involving nodes: {}", cycle_nodes.join(", ")),
        );
    }
}

/// Kahn's algorithm over the known nodes. Returns the nodes left with incoming edges.
fn find_cycle(graph: &Graph) -> Option<Vec<String>> {
    let nodes: BTreeSet<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
    let mut indeg: BTreeMap<&str, usize> = nodes.iter().map(|n| (*n, 0)).collect();
    let mut outgoing: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for e in graph.edges() {
        if !nodes.contains(e.source.as_str()) || !nodes.contains(e.target.as_str()) {
            continue;
        }
        if let Some(d) = indeg.get_mut(e.target.as_str()) {
            *d += 1;
        }
        outgoing.entry(e.source.as_str()).or_default().push(e.target.as_str());
    }

    let mut q: VecDeque<&str> = indeg
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(n, _)| *n)
        .collect();

    let mut visited = 0usize;
    while let Some(n) = q.pop_front() {
        visited += 1;
        for m in outgoing.get(n).map(|v| v.as_slice()).unwrap_or(&[]) {
            if let Some(d) = indeg.get_mut(m) {
                *d -= 1;
                if *d == 0 {
                    q.push_back(*m);
                }
            }
        }
    }

    if visited == nodes.len() {
        return None;
    }
    Some(
        indeg
            .into_iter()
            .filter(|(_, d)| *d > 0)
            .map(|(n, _)| n.to_string())
            .collect(),
    )
}
