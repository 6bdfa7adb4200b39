use std::collections::{HashMap, HashSet, VecDeque};

use crate::types::{Edge, Node, NodeKind, WorkflowDocument};

/// Immutable in-memory workflow graph.
///
/// Construction never fails: dangling edges, duplicate ids and missing start nodes are
/// reported by [`crate::validate_graph`] and tolerated by the engine at run time.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    id: Option<String>,
    name: Option<String>,
    nodes: Vec<Node>,
    /// node_id -> index into `nodes`; the last definition of a duplicated id wins.
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    /// node_id -> indices into `edges`, in document order.
    outgoing: HashMap<String, Vec<usize>>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();

        let mut outgoing: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, e) in edges.iter().enumerate() {
            outgoing.entry(e.source.clone()).or_default().push(i);
        }

        Self {
            id: None,
            name: None,
            nodes,
            index,
            edges,
            outgoing,
        }
    }

    pub fn from_document(doc: WorkflowDocument) -> Self {
        let nodes = doc.nodes.into_iter().map(Node::from).collect();
        let edges = doc.edges.into_iter().map(Edge::from).collect();
        let mut graph = Self::new(nodes, edges);
        graph.id = doc.id;
        graph.name = doc.name;
        graph
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// First node of kind `start` in document order.
    pub fn start_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Start)
    }

    pub fn start_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Start)
    }

    /// Outgoing edges of `id`, in document order.
    pub fn outgoing(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.outgoing
            .get(id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&i| &self.edges[i])
    }

    /// Node ids reachable from the start node following every edge, in BFS order.
    pub fn reachable_from_start(&self) -> Vec<String> {
        let Some(start) = self.start_node() else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([start.id.clone()]);
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id.clone()) || !self.contains(&id) {
                continue;
            }
            for e in self.outgoing(&id) {
                queue.push_back(e.target.clone());
            }
            order.push(id);
        }
        order
    }
}
