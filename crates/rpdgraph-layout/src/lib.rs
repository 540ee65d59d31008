#![forbid(unsafe_code)]

//! Deterministic layout of discipline graphs.
//!
//! [`layout_single`] and [`layout_multi`] turn discipline metadata (or the typed graph built
//! from it) into positioned, styled nodes and edges. Both are pure and total: malformed input
//! degrades to defaults and dangling references are dropped, never reported as errors.

mod builder;
pub mod config;
pub mod detail;
pub mod model;
pub mod multi;
pub mod palette;
mod radial;
pub mod session;
pub mod single;
pub mod style;
pub mod text;

pub use config::{LayoutConfig, NodeSize};
pub use detail::{DisplayField, DisplayModel, FieldValue, HoursEntry, project};
pub use model::{
    Bounds, EdgeKind, EdgeRouting, EdgeStyle, Layout, LayoutEdge, LayoutNode, NodeStyle,
};
pub use multi::layout_multi;
pub use palette::{ColorFamily, colors_for, shade_index_for, shade_index_with_divisor};
pub use session::{Notice, NoticeSeverity, Session};
pub use single::layout_single;

use rpdgraph_core::MultiGraphResponse;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read layout config: {0}")]
    Io(#[from] std::io::Error),
    #[error("layout config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("layout config YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported layout config format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedConfigFormat { path: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Lays out a multi-graph response as returned by the comparison service.
pub fn layout_response(response: &MultiGraphResponse, config: &LayoutConfig) -> Layout {
    layout_multi(
        &response.disciplines,
        &response.graph_nodes,
        &response.graph_edges,
        config,
    )
}
