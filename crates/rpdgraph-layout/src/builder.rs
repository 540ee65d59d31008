//! Accumulates placed nodes and edges while enforcing the output invariants: node ids are
//! unique, edge ids are unique, and no edge refers to a node that was not placed.

use crate::model::{Bounds, EdgeKind, Layout, LayoutEdge, LayoutNode, NodeStyle};
use crate::palette::ColorFamily;
use crate::style::style_edge;
use rpdgraph_core::{NodeKind, NodePayload};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub(crate) struct NodeSpec {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub at: Point,
    pub size: crate::config::NodeSize,
    pub style: NodeStyle,
    pub payload: NodePayload,
}

#[derive(Default)]
pub(crate) struct LayoutBuilder {
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
    node_ids: FxHashSet<String>,
    edge_ids: FxHashSet<String>,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_ids.contains(id)
    }

    /// Places a node. Returns `false` (and places nothing) when the id is already taken.
    pub fn add_node(&mut self, spec: NodeSpec) -> bool {
        if !self.node_ids.insert(spec.id.clone()) {
            tracing::warn!(id = %spec.id, "duplicate node id; keeping the first placement");
            return false;
        }
        self.nodes.push(LayoutNode {
            id: spec.id,
            kind: spec.kind,
            label: spec.label,
            x: spec.at.x,
            y: spec.at.y,
            width: spec.size.width,
            height: spec.size.height,
            style: spec.style,
            payload: spec.payload,
        });
        true
    }

    /// Connects two placed nodes. Edges with a missing endpoint or an id already emitted are
    /// skipped; the return value says whether the edge was added.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        kind: EdgeKind,
        label: Option<&str>,
        family: Option<&ColorFamily>,
    ) -> bool {
        if !(self.contains(source) && self.contains(target)) {
            tracing::warn!(%source, %target, ?kind, "skipping edge with a missing endpoint");
            return false;
        }
        // Shared sections are symmetric: one edge per unordered pair.
        let id = match kind {
            EdgeKind::SharedSection => {
                let (a, b) = if source <= target {
                    (source, target)
                } else {
                    (target, source)
                };
                format!("shared:{a}--{b}")
            }
            _ => format!("{source}->{target}"),
        };
        if !self.edge_ids.insert(id.clone()) {
            return false;
        }
        let (routing, style, animated) = style_edge(kind, family);
        self.edges.push(LayoutEdge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            kind,
            routing,
            style,
            label: label.map(str::to_string),
            animated,
        });
        true
    }

    pub fn finish(self) -> Layout {
        let bounds = Bounds::from_points(self.nodes.iter().flat_map(|n| {
            [
                (n.x - n.width / 2.0, n.y - n.height / 2.0),
                (n.x + n.width / 2.0, n.y + n.height / 2.0),
            ]
        }));
        Layout {
            nodes: self.nodes,
            edges: self.edges,
            bounds,
        }
    }
}
