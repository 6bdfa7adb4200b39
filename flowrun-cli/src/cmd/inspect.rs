use std::collections::HashSet;
use std::path::Path;

use flowrun_core::Graph;
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::utils::load_workflow;
use crate::OutputArgs;

#[derive(Serialize)]
struct NodeInfo {
    id: String,
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    out_degree: usize,
}

#[derive(Serialize)]
struct EdgeInfo {
    source: String,
    target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    handle: Option<String>,
}

#[derive(Serialize)]
struct InspectResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<String>,
    nodes: Vec<NodeInfo>,
    edges: Vec<EdgeInfo>,
    reachable: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unreachable: Vec<String>,
}

impl InspectResult {
    fn from_graph(graph: &Graph) -> Self {
        let reachable = graph.reachable_from_start();
        let seen: HashSet<&str> = reachable.iter().map(String::as_str).collect();

        Self {
            workflow_id: graph.id().map(str::to_string),
            name: graph.name().map(str::to_string),
            start: graph.start_node().map(|n| n.id.clone()),
            nodes: graph
                .nodes()
                .iter()
                .map(|n| NodeInfo {
                    id: n.id.clone(),
                    kind: n.kind.to_string(),
                    label: n.label.clone(),
                    out_degree: graph.outgoing(&n.id).count(),
                })
                .collect(),
            edges: graph
                .edges()
                .iter()
                .map(|e| EdgeInfo {
                    source: e.source.clone(),
                    target: e.target.clone(),
                    handle: e.source_handle.clone(),
                })
                .collect(),
            unreachable: graph
                .nodes()
                .iter()
                .filter(|n| !seen.contains(n.id.as_str()))
                .map(|n| n.id.clone())
                .collect(),
            reachable,
        }
    }
}

pub async fn inspect_cmd(path: &Path, output: OutputArgs) -> i32 {
    let graph = match load_workflow(path, &output) {
        Ok(p) => p.into_graph(),
        Err(code) => return code,
    };
    let result = InspectResult::from_graph(&graph);

    if output.format == OutputFormat::Text && !output.quiet {
        print_text(&result);
    } else {
        print_result(output.format, output.quiet, &result);
    }
    exit_codes::SUCCESS
}

fn print_text(result: &InspectResult) {
    if let Some(name) = &result.name {
        println!("workflow: {name}");
    }
    println!("start: {}", result.start.as_deref().unwrap_or("<none>"));
    println!("nodes:");
    for n in &result.nodes {
        println!(
            "  {} [{}] {} (out: {})",
            n.id,
            n.kind,
            n.label.as_deref().unwrap_or(""),
            n.out_degree
        );
    }
    println!("edges:");
    for e in &result.edges {
        match &e.handle {
            Some(h) => println!("  {} -> {} ({h})", e.source, e.target),
            None => println!("  {} -> {}", e.source, e.target),
        }
    }
    println!("reachable: {}", result.reachable.join(", "));
    if !result.unreachable.is_empty() {
        println!("unreachable: {}", result.unreachable.join(", "));
    }
}
