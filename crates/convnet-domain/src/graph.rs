//! Graph model: amendment and person nodes joined by directed edges

use std::collections::{HashMap, HashSet};
use std::fmt;

/// Kind of node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An amendment (or motion) record
    Amendment,
    /// An author or supporter
    Person,
}

impl NodeKind {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Amendment => "amendment",
            NodeKind::Person => "person",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation carried by an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Person wrote the amendment
    Authored,
    /// Person co-signed the amendment
    Supports,
}

impl Relation {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Authored => "authored",
            Relation::Supports => "supports",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amendment node. Identity is the record id.
#[derive(Debug, Clone, PartialEq)]
pub struct AmendmentNode {
    /// Record id
    pub id: String,
    /// Display label
    pub label: String,
    /// Convention id
    pub convention: String,
    /// Source page
    pub url: String,
    /// Distinct supporters retained
    pub weight: u64,
}

/// Person node. Identity is `person-<slug>`.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonNode {
    /// Node id
    pub id: String,
    /// First-seen display name
    pub label: String,
    /// Last-seen non-empty regional-chapter tag
    pub kv: String,
    /// Visualization size: 10 × round(total experience)
    pub weight: i64,
}

/// A graph node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Amendment node
    Amendment(AmendmentNode),
    /// Person node
    Person(PersonNode),
}

impl Node {
    /// Node id
    pub fn id(&self) -> &str {
        match self {
            Node::Amendment(a) => &a.id,
            Node::Person(p) => &p.id,
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            Node::Amendment(a) => &a.label,
            Node::Person(p) => &p.label,
        }
    }

    /// Node kind
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Amendment(_) => NodeKind::Amendment,
            Node::Person(_) => NodeKind::Person,
        }
    }

    /// Integer node weight
    pub fn weight(&self) -> i64 {
        match self {
            Node::Amendment(a) => a.weight as i64,
            Node::Person(p) => p.weight,
        }
    }
}

/// Directed edge from a person to an amendment
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Person id
    pub source: String,
    /// Amendment id
    pub target: String,
    /// Authored or supports
    pub relation: Relation,
    /// Convention of the target amendment
    pub convention: String,
    /// Final edge weight
    pub weight: f64,
}

/// Finished influence network
///
/// Nodes and edges keep creation order, which makes exports reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfluenceGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl InfluenceGraph {
    /// Assemble a graph from parts
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Nodes in creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in creation order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Look up the edge between a person and an amendment
    pub fn edge(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    /// Amendment nodes
    pub fn amendments(&self) -> impl Iterator<Item = &AmendmentNode> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Amendment(a) => Some(a),
            Node::Person(_) => None,
        })
    }

    /// Person nodes
    pub fn persons(&self) -> impl Iterator<Item = &PersonNode> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Person(p) => Some(p),
            Node::Amendment(_) => None,
        })
    }

    /// Total degree per node id
    pub fn degrees(&self) -> HashMap<&str, usize> {
        degree_map(&self.edges)
    }

    /// Whether any (source, target) pair occurs more than once
    pub fn has_duplicate_edges(&self) -> bool {
        let mut seen = HashSet::new();
        !self
            .edges
            .iter()
            .all(|e| seen.insert((e.source.as_str(), e.target.as_str())))
    }
}

/// Total degree per node id over an edge list
pub(crate) fn degree_map(edges: &[Edge]) -> HashMap<&str, usize> {
    let mut degrees: HashMap<&str, usize> = HashMap::new();
    for edge in edges {
        *degrees.entry(edge.source.as_str()).or_insert(0) += 1;
        *degrees.entry(edge.target.as_str()).or_insert(0) += 1;
    }
    degrees
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(source: &str, target: &str) -> Edge {
        Edge {
            source: source.into(),
            target: target.into(),
            relation: Relation::Supports,
            convention: "51bdk".into(),
            weight: 1.0,
        }
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(NodeKind::Amendment.to_string(), "amendment");
        assert_eq!(NodeKind::Person.to_string(), "person");
        assert_eq!(Relation::Authored.to_string(), "authored");
        assert_eq!(Relation::Supports.to_string(), "supports");
    }

    #[test]
    fn test_degrees() {
        let graph = InfluenceGraph::new(
            Vec::new(),
            vec![edge("person-a", "x"), edge("person-a", "y"), edge("person-b", "x")],
        );
        let degrees = graph.degrees();
        assert_eq!(degrees["person-a"], 2);
        assert_eq!(degrees["person-b"], 1);
        assert_eq!(degrees["x"], 2);
        assert_eq!(degrees["y"], 1);
    }

    #[test]
    fn test_duplicate_detection() {
        let unique = InfluenceGraph::new(Vec::new(), vec![edge("p", "x"), edge("p", "y")]);
        assert!(!unique.has_duplicate_edges());

        let duplicated = InfluenceGraph::new(Vec::new(), vec![edge("p", "x"), edge("p", "x")]);
        assert!(duplicated.has_duplicate_edges());
    }

    #[test]
    fn test_node_accessors() {
        let node = Node::Person(PersonNode {
            id: "person-a".into(),
            label: "A".into(),
            kv: String::new(),
            weight: 20,
        });
        assert_eq!(node.id(), "person-a");
        assert_eq!(node.label(), "A");
        assert_eq!(node.kind(), NodeKind::Person);
        assert_eq!(node.weight(), 20);
    }
}
