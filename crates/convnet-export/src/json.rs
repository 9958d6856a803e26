//! JSON property graph writer.

use crate::error::Result;
use crate::GraphWriter;
use convnet_domain::{InfluenceGraph, Node};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct JsonGraph<'a> {
    directed: bool,
    nodes: Vec<JsonNode<'a>>,
    edges: Vec<JsonEdge<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonNode<'a> {
    id: &'a str,
    label: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    convention: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kv: Option<&'a str>,
    weight: i64,
}

#[derive(Debug, Serialize)]
struct JsonEdge<'a> {
    id: String,
    source: &'a str,
    target: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    convention: &'a str,
    weight: f64,
}

impl<'a> From<&'a Node> for JsonNode<'a> {
    fn from(node: &'a Node) -> Self {
        let (convention, url, kv) = match node {
            Node::Amendment(a) => (Some(a.convention.as_str()), Some(a.url.as_str()), None),
            Node::Person(p) => (None, None, Some(p.kv.as_str())),
        };
        JsonNode {
            id: node.id(),
            label: node.label(),
            kind: node.kind().as_str(),
            convention,
            url,
            kv,
            weight: node.weight(),
        }
    }
}

/// Writes graphs as `{ "directed": true, "nodes": [...], "edges": [...] }`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    /// Compact single-line output
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Indented output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl GraphWriter for JsonWriter {
    fn write_graph(&self, graph: &InfluenceGraph, out: &mut dyn Write) -> Result<()> {
        let doc = JsonGraph {
            directed: true,
            nodes: graph.nodes().iter().map(JsonNode::from).collect(),
            edges: graph
                .edges()
                .iter()
                .enumerate()
                .map(|(i, e)| JsonEdge {
                    id: format!("e{}", i),
                    source: &e.source,
                    target: &e.target,
                    kind: e.relation.as_str(),
                    convention: &e.convention,
                    weight: e.weight,
                })
                .collect(),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &doc)?;
        } else {
            serde_json::to_writer(&mut *out, &doc)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convnet_domain::{AmendmentNode, Edge, PersonNode, Relation};
    use serde_json::Value;

    fn sample_graph() -> InfluenceGraph {
        InfluenceGraph::new(
            vec![
                Node::Amendment(AmendmentNode {
                    id: "a".into(),
                    label: "A".into(),
                    convention: "51bdk".into(),
                    url: String::new(),
                    weight: 2,
                }),
                Node::Person(PersonNode {
                    id: "person-ben".into(),
                    label: "Ben".into(),
                    kv: "Mitte".into(),
                    weight: 10,
                }),
            ],
            vec![Edge {
                source: "person-ben".into(),
                target: "a".into(),
                relation: Relation::Supports,
                convention: "51bdk".into(),
                weight: 3.0,
            }],
        )
    }

    #[test]
    fn test_document_shape() {
        let text = JsonWriter::compact().render(&sample_graph()).unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(doc["directed"], true);
        assert_eq!(doc["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(doc["nodes"][0]["type"], "amendment");
        assert_eq!(doc["nodes"][0]["convention"], "51bdk");
        assert!(doc["nodes"][0].get("kv").is_none());
        assert_eq!(doc["nodes"][1]["kv"], "Mitte");
        assert!(doc["nodes"][1].get("url").is_none());

        assert_eq!(doc["edges"][0]["id"], "e0");
        assert_eq!(doc["edges"][0]["type"], "supports");
        assert_eq!(doc["edges"][0]["weight"], 3.0);
    }

    #[test]
    fn test_compact_is_single_line() {
        let text = JsonWriter::compact().render(&sample_graph()).unwrap();
        assert_eq!(text.trim_end().lines().count(), 1);
        let pretty = JsonWriter::pretty().render(&sample_graph()).unwrap();
        assert!(pretty.lines().count() > 1);
    }
}
