//! Boundary types exchanged with the analysis/storage service, and the store abstraction used
//! to fetch them.

use crate::category::Category;
use crate::graph::{GraphEdge, GraphNode, build_graph, build_multi_graph};
use crate::lenient;
use crate::model::DisciplineMetadata;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub filename: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub upload_date: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub file_size: u64,
    #[serde(default = "processed", deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub discipline_name: String,
    #[serde(default)]
    pub category: Category,
}

fn processed() -> String {
    "processed".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub file_id: String,
    pub metadata: DisciplineMetadata,
    #[serde(default, deserialize_with = "lenient::lenient_list")]
    pub graph_nodes: Vec<GraphNode>,
    #[serde(default, deserialize_with = "lenient::lenient_list")]
    pub graph_edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiGraphResponse {
    #[serde(default, deserialize_with = "lenient::lenient_list")]
    pub disciplines: Vec<DisciplineMetadata>,
    #[serde(default, deserialize_with = "lenient::lenient_list")]
    pub graph_nodes: Vec<GraphNode>,
    #[serde(default, deserialize_with = "lenient::lenient_list")]
    pub graph_edges: Vec<GraphEdge>,
}

impl MultiGraphResponse {
    pub fn build(disciplines: Vec<DisciplineMetadata>) -> Self {
        let (graph_nodes, graph_edges) = build_multi_graph(&disciplines);
        Self {
            disciplines,
            graph_nodes,
            graph_edges,
        }
    }
}

/// The analysis/storage collaborator.
///
/// Methods return futures so implementations can sit on any async runtime; callers await one
/// request per user action.
pub trait DisciplineStore {
    fn list_files(&self) -> impl Future<Output = Result<Vec<FileInfo>>> + Send;

    fn fetch(&self, id: &str) -> impl Future<Output = Result<AnalysisResponse>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    fn multi_graph(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<MultiGraphResponse>> + Send;
}

#[derive(Debug, Clone)]
struct StoredFile {
    info: FileInfo,
    metadata: DisciplineMetadata,
}

/// In-process store keeping analyzed files in insertion order. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RwLock<IndexMap<String, StoredFile>>,
    /// Last issued id number. Ids are never reused, even after a delete.
    issued: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `metadata` under a fresh id and returns the listing entry.
    pub fn insert(&self, filename: &str, file_size: u64, metadata: DisciplineMetadata) -> FileInfo {
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        let info = FileInfo {
            id: format!("file-{n}"),
            filename: filename.to_string(),
            upload_date: String::new(),
            file_size,
            status: processed(),
            discipline_name: metadata.name.clone(),
            category: metadata.category,
        };
        files.insert(
            info.id.clone(),
            StoredFile {
                info: info.clone(),
                metadata,
            },
        );
        info
    }

    fn list_now(&self) -> Vec<FileInfo> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.values().rev().map(|f| f.info.clone()).collect()
    }

    fn fetch_now(&self, id: &str) -> Result<AnalysisResponse> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        let stored = files
            .get(id)
            .ok_or_else(|| Error::NotFound { id: id.to_string() })?;
        let (graph_nodes, graph_edges) = build_graph(&stored.metadata, "");
        Ok(AnalysisResponse {
            file_id: id.to_string(),
            metadata: stored.metadata.clone(),
            graph_nodes,
            graph_edges,
        })
    }

    fn delete_now(&self, id: &str) {
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        files.shift_remove(id);
    }

    fn multi_graph_now(&self, ids: &[String]) -> Result<MultiGraphResponse> {
        let disciplines: Vec<DisciplineMetadata> = {
            let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
            ids.iter()
                .filter_map(|id| files.get(id).map(|f| f.metadata.clone()))
                .collect()
        };
        if disciplines.is_empty() {
            return Err(Error::NoneFound { ids: ids.to_vec() });
        }
        Ok(MultiGraphResponse::build(disciplines))
    }
}

impl DisciplineStore for MemoryStore {
    fn list_files(&self) -> impl Future<Output = Result<Vec<FileInfo>>> + Send {
        std::future::ready(Ok(self.list_now()))
    }

    fn fetch(&self, id: &str) -> impl Future<Output = Result<AnalysisResponse>> + Send {
        std::future::ready(self.fetch_now(id))
    }

    fn delete(&self, id: &str) -> impl Future<Output = Result<()>> + Send {
        self.delete_now(id);
        std::future::ready(Ok(()))
    }

    fn multi_graph(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<MultiGraphResponse>> + Send {
        std::future::ready(self.multi_graph_now(ids))
    }
}
