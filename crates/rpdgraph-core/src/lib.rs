#![forbid(unsafe_code)]

//! Discipline metadata model and graph building (headless).
//!
//! This crate owns the data that flows into the layout engine:
//! - [`DisciplineMetadata`] as produced by the document analyzer, coerced leniently so that
//!   malformed fields never fail deserialization
//! - the typed [`GraphNode`]/[`GraphEdge`] graph, including cross-discipline shared sections
//! - the [`DisciplineStore`] boundary to the analysis/storage service

pub mod category;
pub mod error;
pub mod graph;
pub mod lenient;
pub mod model;
pub mod software;
pub mod source;

pub use category::{Category, classify};
pub use error::{Error, Result};
pub use graph::{
    DisciplineSummary, GraphEdge, GraphNode, NodeKind, NodePayload, SectionPayload,
    build_graph, build_multi_graph, is_shared_section_label, normalize_section_name,
    shared_section_pairs,
};
pub use model::{
    DisciplineMetadata, EntryType, Hours, LiteratureEntry, LiteratureList, Section,
};
pub use software::link_software;
pub use source::{AnalysisResponse, DisciplineStore, FileInfo, MemoryStore, MultiGraphResponse};
