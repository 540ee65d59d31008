//! Comparison layout for several disciplines.
//!
//! The input graph is trusted only for structure: every discipline's branches are recovered by
//! following edges from its node, then placed with the same radial sub-layout as single mode.
//! Geometry from the input is ignored.

use crate::builder::{LayoutBuilder, NodeSpec, Point};
use crate::config::LayoutConfig;
use crate::model::{EdgeKind, Layout};
use crate::palette::{ColorFamily, TECHNICAL, colors_for, shade_index_with_divisor};
use crate::radial::{Branch, Branches, SectionBranch, horizontal_reach, place_branches};
use crate::single::{UNTITLED_SOURCE, UNTITLED_TOOL};
use crate::style::style_node;
use crate::text::truncate_label;
use indexmap::IndexMap;
use rpdgraph_core::graph::{NO_DIRECTION, SHARED_SECTION_LABEL};
use rpdgraph_core::model::{PLACEHOLDER, UNTITLED};
use rpdgraph_core::{
    Category, DisciplineMetadata, DisciplineSummary, GraphEdge, GraphNode, NodeKind, NodePayload,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::hash_map::Entry;

const SUPER_ROOT_LABEL: &str = "Disciplines";

/// Lookup over the input graph. Shared-section edges and edges with an unknown endpoint are
/// kept out of the adjacency.
struct GraphIndex<'a> {
    nodes: FxHashMap<&'a str, &'a GraphNode>,
    outgoing: FxHashMap<&'a str, Vec<&'a GraphEdge>>,
}

impl<'a> GraphIndex<'a> {
    fn new(nodes: &'a [GraphNode], edges: &'a [GraphEdge]) -> Self {
        let mut by_id: FxHashMap<&str, &GraphNode> = FxHashMap::default();
        for node in nodes {
            match by_id.entry(node.id.as_str()) {
                Entry::Occupied(_) => tracing::warn!(id = %node.id, "duplicate graph node id"),
                Entry::Vacant(slot) => {
                    slot.insert(node);
                }
            }
        }

        let mut outgoing: FxHashMap<&str, Vec<&GraphEdge>> = FxHashMap::default();
        for edge in edges {
            let known = |id: &str| by_id.contains_key(id);
            if !(known(&edge.source) && known(&edge.target)) {
                tracing::warn!(
                    source = %edge.source,
                    target = %edge.target,
                    "dropping edge that references an unknown node"
                );
                continue;
            }
            if edge.is_shared_section() {
                continue;
            }
            outgoing.entry(edge.source.as_str()).or_default().push(edge);
        }
        Self {
            nodes: by_id,
            outgoing,
        }
    }

    /// Distinct targets of `id`'s outgoing edges that are of `kind`, in edge order.
    fn children(&self, id: &str, kind: NodeKind) -> Vec<&'a GraphNode> {
        let mut seen = FxHashSet::default();
        self.outgoing
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|e| self.nodes.get(e.target.as_str()).copied())
            .filter(|n| n.kind == kind && seen.insert(n.id.as_str()))
            .collect()
    }
}

/// The untruncated display text of a node: its payload name or title, else the graph label.
fn full_label(node: &GraphNode, payload: &NodePayload, fallback: &str) -> String {
    let from_payload = match payload {
        NodePayload::Discipline(d) => d.name.as_str(),
        NodePayload::Section(s) => s.name.as_str(),
        NodePayload::Software { name, .. } => name.as_str(),
        NodePayload::Direction { name, .. } => name.as_str(),
        NodePayload::Literature(entry) => entry.display_title(),
        NodePayload::SuperRoot { .. } => "",
    };
    [from_payload, node.label.as_str()]
        .into_iter()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn branch(node: &GraphNode, fallback: &str) -> Branch {
    let payload = node.payload();
    Branch {
        id: node.id.clone(),
        label: full_label(node, &payload, fallback),
        payload,
    }
}

fn branches_of(index: &GraphIndex<'_>, discipline_id: &str) -> Branches {
    let mut software: IndexMap<&str, &GraphNode> = IndexMap::new();
    let sections: Vec<SectionBranch> = index
        .children(discipline_id, NodeKind::Section)
        .into_iter()
        .enumerate()
        .map(|(i, sec)| {
            let linked = index
                .children(&sec.id, NodeKind::Software)
                .into_iter()
                .map(|sw| software.insert_full(sw.id.as_str(), sw).0)
                .collect();
            SectionBranch {
                node: branch(sec, &format!("Section {}", i + 1)),
                software: linked,
            }
        })
        .collect();
    for sw in index.children(discipline_id, NodeKind::Software) {
        software.entry(sw.id.as_str()).or_insert(sw);
    }

    let literature = |kind: NodeKind| -> Vec<Branch> {
        index
            .children(discipline_id, kind)
            .into_iter()
            .map(|n| branch(n, UNTITLED_SOURCE))
            .collect()
    };
    Branches {
        sections,
        software: software.values().map(|sw| branch(sw, UNTITLED_TOOL)).collect(),
        main_literature: literature(NodeKind::LitMain),
        additional_literature: literature(NodeKind::LitAdd),
    }
}

/// Discipline payload plus its color family and shade. Missing category or period on the node
/// are filled from the metadata with the same name.
fn discipline_style(
    node: &GraphNode,
    disciplines: &[DisciplineMetadata],
    config: &LayoutConfig,
) -> (DisciplineSummary, &'static ColorFamily, usize) {
    let mut summary = match node.payload() {
        NodePayload::Discipline(summary) => summary,
        _ => DisciplineSummary::default(),
    };
    let name = [summary.name.trim(), node.label.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or_default();
    let meta = disciplines.iter().find(|d| d.name.trim() == name);

    if let Some(meta) = meta {
        if summary.name.trim().is_empty() {
            summary = DisciplineSummary::from(meta);
        }
        if summary.category.is_none() {
            summary.category = Some(meta.category.as_str().to_string());
        }
        let period = summary.period.trim();
        if period.is_empty() || period == PLACEHOLDER {
            summary.period = meta.period.clone();
        }
    }

    let family = colors_for(
        summary
            .category
            .as_deref()
            .map(Category::from_tag)
            .unwrap_or_default(),
    );
    let shade = shade_index_with_divisor(&summary.period, config.shade_count, config.shade_divisor);
    (summary, family, shade)
}

/// Lays out several disciplines grouped by direction, with cross-discipline shared-section
/// edges drawn last.
///
/// Disciplines in a row are spaced by `discipline_spacing`, widened when their branches would
/// otherwise reach into each other. Literature beyond `main_literature_cap` /
/// `additional_literature_cap` is not placed.
///
/// `disciplines` only backs up node payloads that lack a category or period. Edges that
/// reference unknown nodes are dropped and logged; the call never fails.
pub fn layout_multi(
    disciplines: &[DisciplineMetadata],
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    config: &LayoutConfig,
) -> Layout {
    let index = GraphIndex::new(nodes, edges);
    let mut out = LayoutBuilder::new();

    let super_root = nodes.iter().find(|n| n.kind == NodeKind::SuperRoot);
    if let Some(root) = super_root {
        let payload = root.payload();
        out.add_node(NodeSpec {
            id: root.id.clone(),
            kind: NodeKind::SuperRoot,
            label: truncate_label(
                &full_label(root, &payload, SUPER_ROOT_LABEL),
                config.discipline_label_chars,
            ),
            at: Point::ORIGIN,
            size: config.super_root_size,
            style: style_node(NodeKind::SuperRoot, &TECHNICAL, 0),
            payload,
        });
    }

    // Group disciplines under the first direction that links them; the rest go last.
    let mut claimed: FxHashSet<&str> = FxHashSet::default();
    let mut groups: Vec<(Option<&GraphNode>, Vec<&GraphNode>)> = Vec::new();
    for direction in nodes.iter().filter(|n| n.kind == NodeKind::Direction) {
        if groups
            .iter()
            .any(|(d, _)| d.is_some_and(|d| d.id == direction.id))
        {
            continue;
        }
        let members = index
            .children(&direction.id, NodeKind::Discipline)
            .into_iter()
            .filter(|d| claimed.insert(d.id.as_str()))
            .collect();
        groups.push((Some(direction), members));
    }
    let orphans: Vec<&GraphNode> = nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Discipline && claimed.insert(n.id.as_str()))
        .collect();
    if !orphans.is_empty() {
        groups.push((None, orphans));
    }

    // Branches are recovered once: they size the slots and are placed below.
    let groups: Vec<(Option<&GraphNode>, Vec<(&GraphNode, Branches)>)> = groups
        .into_iter()
        .map(|(direction, members)| {
            let members: Vec<(&GraphNode, Branches)> = members
                .into_iter()
                .map(|d| (d, branches_of(&index, &d.id)))
                .collect();
            (direction, members)
        })
        .collect();

    // Neighbouring disciplines are at least far enough apart that the widest left reach and
    // the widest right reach do not meet.
    let (left, right) = groups
        .iter()
        .flat_map(|(_, members)| members.iter())
        .map(|(_, branches)| horizontal_reach(branches, config))
        .fold((0.0_f64, 0.0_f64), |(l, r), (bl, br)| (l.max(bl), r.max(br)));
    let half_discipline = config.discipline_size.width / 2.0;
    let pitch = config
        .discipline_spacing
        .max(left.max(half_discipline) + right.max(half_discipline) + config.discipline_gap);

    let widest = groups.iter().map(|(_, m)| m.len()).max().unwrap_or(0);
    let group_spacing = config.direction_spacing.max(widest as f64 * pitch);
    let centered = |i: usize, count: usize, spacing: f64| {
        (i as f64 - (count as f64 - 1.0) / 2.0) * spacing
    };
    let discipline_y = config.direction_row_y + config.discipline_row_offset;

    for (gi, (direction, members)) in groups.iter().enumerate() {
        let gx = centered(gi, groups.len(), group_spacing);
        if let Some(direction) = direction {
            let payload = direction.payload();
            out.add_node(NodeSpec {
                id: direction.id.clone(),
                kind: NodeKind::Direction,
                label: truncate_label(
                    &full_label(direction, &payload, NO_DIRECTION),
                    config.direction_label_chars,
                ),
                at: Point::new(gx, config.direction_row_y),
                size: config.direction_size,
                style: style_node(NodeKind::Direction, &TECHNICAL, 0),
                payload,
            });
            if let Some(root) = super_root {
                out.add_edge(&root.id, &direction.id, EdgeKind::Hierarchy, None, None);
            }
        }

        for (mi, (disc, branches)) in members.iter().enumerate() {
            let at = Point::new(gx + centered(mi, members.len(), pitch), discipline_y);
            let (summary, family, shade) = discipline_style(disc, disciplines, config);
            let label = [summary.name.trim(), disc.label.trim()]
                .into_iter()
                .find(|s| !s.is_empty())
                .unwrap_or(UNTITLED)
                .to_string();
            let placed = out.add_node(NodeSpec {
                id: disc.id.clone(),
                kind: NodeKind::Discipline,
                label: truncate_label(&label, config.discipline_label_chars),
                at,
                size: config.discipline_size,
                style: style_node(NodeKind::Discipline, family, shade),
                payload: NodePayload::Discipline(summary),
            });
            if !placed {
                continue;
            }
            if let Some(direction) = direction {
                out.add_edge(&direction.id, &disc.id, EdgeKind::Hierarchy, None, None);
            }
            place_branches(&mut out, &disc.id, at, branches, family, config);
        }
    }

    let mut shared = 0usize;
    for edge in edges.iter().filter(|e| e.is_shared_section()) {
        if !(out.contains(&edge.source) && out.contains(&edge.target)) {
            tracing::debug!(
                source = %edge.source,
                target = %edge.target,
                "shared-section edge endpoint not placed"
            );
            continue;
        }
        if out.add_edge(
            &edge.source,
            &edge.target,
            EdgeKind::SharedSection,
            Some(SHARED_SECTION_LABEL),
            None,
        ) {
            shared += 1;
        }
    }

    let layout = out.finish();
    tracing::debug!(
        groups = groups.len(),
        pitch,
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        shared,
        "multi-discipline layout"
    );
    layout
}
