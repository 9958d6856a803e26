//! GEXF 1.2draft writer
//!
//! Nodes carry `type`, `weight` and, depending on kind, `convention`/`url` or
//! `kv`. Edges are directed from person to amendment and numbered `e0`, `e1`, ...
//! in graph order. Every attribute value is XML-escaped.

use crate::error::Result;
use crate::GraphWriter;
use convnet_domain::{Edge, InfluenceGraph, Node};
use quick_xml::escape::escape;
use std::io::Write;

const GEXF_NAMESPACE: &str = "http://www.gexf.net/1.2draft";
const GEXF_VERSION: &str = "1.2";

/// Writes graphs as GEXF documents
#[derive(Debug, Clone, Copy, Default)]
pub struct GexfWriter;

impl GexfWriter {
    /// Create a GEXF writer
    pub fn new() -> Self {
        Self
    }

    fn write_header(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(out, r#"<gexf xmlns="{}" version="{}">"#, GEXF_NAMESPACE, GEXF_VERSION)?;
        writeln!(out, r#"  <graph mode="static" defaultedgetype="directed">"#)?;

        writeln!(out, r#"    <attributes class="node" mode="static">"#)?;
        writeln!(out, r#"      <attribute id="attr_type" title="type" type="string" />"#)?;
        writeln!(out, r#"      <attribute id="attr_convention" title="convention" type="string" />"#)?;
        writeln!(out, r#"      <attribute id="attr_kv" title="kv" type="string" />"#)?;
        writeln!(out, r#"      <attribute id="attr_url" title="url" type="string" />"#)?;
        writeln!(out, r#"      <attribute id="attr_weight" title="weight" type="integer" />"#)?;
        writeln!(out, r#"    </attributes>"#)?;

        writeln!(out, r#"    <attributes class="edge" mode="static">"#)?;
        writeln!(out, r#"      <attribute id="attr_edge_type" title="type" type="string" />"#)?;
        writeln!(out, r#"      <attribute id="attr_edge_convention" title="convention" type="string" />"#)?;
        writeln!(out, r#"    </attributes>"#)?;
        Ok(())
    }

    fn write_node(&self, node: &Node, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            r#"      <node id="{}" label="{}">"#,
            escape(node.id()),
            escape(node.label())
        )?;
        writeln!(out, "        <attvalues>")?;
        attvalue(out, "attr_type", node.kind().as_str())?;
        match node {
            Node::Amendment(a) => {
                attvalue(out, "attr_convention", &a.convention)?;
                attvalue(out, "attr_url", &a.url)?;
            }
            Node::Person(p) => {
                attvalue(out, "attr_kv", &p.kv)?;
            }
        }
        attvalue(out, "attr_weight", &node.weight().to_string())?;
        writeln!(out, "        </attvalues>")?;
        writeln!(out, "      </node>")?;
        Ok(())
    }

    fn write_edge(&self, index: usize, edge: &Edge, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            r#"      <edge id="e{}" source="{}" target="{}" weight="{}">"#,
            index,
            escape(edge.source.as_str()),
            escape(edge.target.as_str()),
            format_weight(edge.weight)
        )?;
        writeln!(out, "        <attvalues>")?;
        attvalue(out, "attr_edge_type", edge.relation.as_str())?;
        attvalue(out, "attr_edge_convention", &edge.convention)?;
        writeln!(out, "        </attvalues>")?;
        writeln!(out, "      </edge>")?;
        Ok(())
    }
}

impl GraphWriter for GexfWriter {
    fn write_graph(&self, graph: &InfluenceGraph, out: &mut dyn Write) -> Result<()> {
        self.write_header(out)?;

        writeln!(out, "    <nodes>")?;
        for node in graph.nodes() {
            self.write_node(node, out)?;
        }
        writeln!(out, "    </nodes>")?;

        writeln!(out, "    <edges>")?;
        for (i, edge) in graph.edges().iter().enumerate() {
            self.write_edge(i, edge, out)?;
        }
        writeln!(out, "    </edges>")?;

        writeln!(out, "  </graph>")?;
        writeln!(out, "</gexf>")?;
        Ok(())
    }
}

fn attvalue(out: &mut dyn Write, attr: &str, value: &str) -> Result<()> {
    writeln!(
        out,
        r#"          <attvalue for="{}" value="{}" />"#,
        attr,
        escape(value)
    )?;
    Ok(())
}

/// Render an edge weight so that integral values keep their decimal point
pub fn format_weight(weight: f64) -> String {
    format!("{:?}", weight)
}
