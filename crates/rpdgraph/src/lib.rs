#![forbid(unsafe_code)]

//! `rpdgraph` turns syllabus metadata ("discipline documents") into navigable graphs.
//!
//! The data model, graph builder and store boundary are re-exported from `rpdgraph-core`.
//!
//! # Features
//!
//! - `layout` (default): radial layout, category coloring and detail views (`rpdgraph::layout`)

pub use rpdgraph_core::*;

#[cfg(feature = "layout")]
pub mod layout {
    pub use rpdgraph_layout::{
        Bounds, ColorFamily, DisplayField, DisplayModel, EdgeKind, EdgeRouting, EdgeStyle,
        FieldValue, HoursEntry, Layout, LayoutConfig, LayoutEdge, LayoutNode, NodeSize, NodeStyle,
        Notice, NoticeSeverity, Session, colors_for, layout_multi, layout_response, layout_single,
        project, shade_index_for, shade_index_with_divisor,
    };
    pub use rpdgraph_layout::{palette, style, text};

    use rpdgraph_core::{AnalysisResponse, DisciplineMetadata, DisciplineStore, MultiGraphResponse};
    use serde_json::Value;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] rpdgraph_core::Error),
        #[error(transparent)]
        Layout(#[from] rpdgraph_layout::Error),
        #[error("input JSON error: {0}")]
        Json(#[from] serde_json::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Reads discipline metadata from JSON. Accepts either the metadata object itself or an
    /// analysis response that wraps it under `metadata`.
    pub fn metadata_from_json_str(text: &str) -> Result<DisciplineMetadata> {
        let value: Value = serde_json::from_str(text)?;
        let is_response = value.get("file_id").is_some()
            && value.get("metadata").is_some_and(Value::is_object);
        if is_response {
            let response: AnalysisResponse = serde_json::from_value(value)?;
            return Ok(response.metadata);
        }
        Ok(DisciplineMetadata::from_value(value)?)
    }

    /// Reads a comparison request: a single multi-graph response, or any number of metadata
    /// documents whose graph is built here.
    pub fn multi_from_json_strs<S: AsRef<str>>(texts: &[S]) -> Result<MultiGraphResponse> {
        if let [only] = texts {
            let value: Value = serde_json::from_str(only.as_ref())?;
            if value.get("graph_nodes").is_some() {
                return Ok(serde_json::from_value(value)?);
            }
        }
        let disciplines = texts
            .iter()
            .map(|t| metadata_from_json_str(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(MultiGraphResponse::build(disciplines))
    }

    /// Bundles a [`LayoutConfig`] with the common JSON-in, layout-out entry points.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessLayouter {
        pub config: LayoutConfig,
    }

    impl HeadlessLayouter {
        pub fn new(config: LayoutConfig) -> Self {
            Self { config }
        }

        /// Loads the config from a `.json`, `.yaml` or `.yml` file.
        pub fn from_config_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
            Ok(Self::new(LayoutConfig::from_path(path)?))
        }

        pub fn layout_json_sync(&self, text: &str) -> Result<Layout> {
            let data = metadata_from_json_str(text)?;
            Ok(layout_single(&data, &self.config))
        }

        pub fn layout_multi_json_sync<S: AsRef<str>>(&self, texts: &[S]) -> Result<Layout> {
            let response = multi_from_json_strs(texts)?;
            Ok(layout_response(&response, &self.config))
        }

        /// Single layout of `text`, then the detail view of node `id` if it exists.
        pub fn detail_json_sync(&self, text: &str, id: &str) -> Result<Option<DisplayModel>> {
            let layout = self.layout_json_sync(text)?;
            Ok(layout.node(id).map(project))
        }

        /// Fetches one analyzed file from `store` and lays it out.
        pub async fn layout_file<S: DisciplineStore>(&self, store: &S, id: &str) -> Result<Layout> {
            let response = store.fetch(id).await?;
            Ok(layout_single(&response.metadata, &self.config))
        }

        pub async fn layout_files<S: DisciplineStore>(
            &self,
            store: &S,
            ids: &[String],
        ) -> Result<Layout> {
            let response = store.multi_graph(ids).await?;
            Ok(layout_response(&response, &self.config))
        }
    }
}
