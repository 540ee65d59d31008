//! Node and edge styling dispatch.

use crate::model::{EdgeKind, EdgeRouting, EdgeStyle, NodeStyle};
use crate::palette::ColorFamily;
use rpdgraph_core::NodeKind;

pub const SOFTWARE_GREEN: &str = "#16a34a";
pub const MAIN_LITERATURE_PURPLE: &str = "#7c3aed";
pub const ADDITIONAL_LITERATURE_BLUE: &str = "#3b82f6";
pub const SHARED_SECTION_RED: &str = "#e11d48";
pub const NEUTRAL_SLATE: &str = "#94a3b8";

fn node_style(fill: &str, stroke: &str, text: &str, stroke_width: f64) -> NodeStyle {
    NodeStyle {
        fill: fill.to_string(),
        stroke: stroke.to_string(),
        text: text.to_string(),
        stroke_width,
    }
}

/// Style for a node of `kind` belonging to a discipline of `family`, drawn at `shade`.
pub fn style_node(kind: NodeKind, family: &ColorFamily, shade: usize) -> NodeStyle {
    match kind {
        NodeKind::SuperRoot => node_style("#0f172a", "#334155", "#ffffff", 2.0),
        NodeKind::Direction => node_style("#f8fafc", "#475569", "#0f172a", 2.0),
        NodeKind::Discipline => node_style(
            family.shade(shade),
            family.text,
            family.text_on_shade(shade),
            3.0,
        ),
        NodeKind::Section => node_style(family.light, family.border, family.text, 1.5),
        NodeKind::Software => node_style("#f0fdf4", SOFTWARE_GREEN, "#14532d", 1.5),
        NodeKind::LitMain => node_style("#f5f3ff", MAIN_LITERATURE_PURPLE, "#4c1d95", 1.5),
        NodeKind::LitAdd => node_style("#eff6ff", ADDITIONAL_LITERATURE_BLUE, "#1e3a8a", 1.5),
    }
}

fn edge_style(stroke: &str, stroke_width: f64, dash: Option<&str>) -> EdgeStyle {
    EdgeStyle {
        stroke: stroke.to_string(),
        stroke_width,
        dash: dash.map(str::to_string),
    }
}

/// Routing, stroke and animation for an edge of `kind`. Hierarchy edges take the owning
/// discipline's family; `None` means a structural edge above any discipline.
pub fn style_edge(kind: EdgeKind, family: Option<&ColorFamily>) -> (EdgeRouting, EdgeStyle, bool) {
    match kind {
        EdgeKind::Hierarchy => (
            EdgeRouting::SmoothStep,
            edge_style(family.map_or(NEUTRAL_SLATE, |f| f.border), 2.0, None),
            false,
        ),
        EdgeKind::SectionSoftware => (
            EdgeRouting::Bezier,
            edge_style(SOFTWARE_GREEN, 1.5, None),
            false,
        ),
        EdgeKind::GeneralTool => (
            EdgeRouting::Bezier,
            edge_style(SOFTWARE_GREEN, 1.5, Some("6 4")),
            false,
        ),
        EdgeKind::MainLiterature => (
            EdgeRouting::SmoothStep,
            edge_style(MAIN_LITERATURE_PURPLE, 1.5, None),
            false,
        ),
        EdgeKind::AdditionalLiterature => (
            EdgeRouting::SmoothStep,
            edge_style(ADDITIONAL_LITERATURE_BLUE, 1.5, Some("5 5")),
            false,
        ),
        EdgeKind::SharedSection => (
            EdgeRouting::Bezier,
            edge_style(SHARED_SECTION_RED, 3.0, Some("8 4")),
            true,
        ),
    }
}
