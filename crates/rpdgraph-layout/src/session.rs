//! Display state for one viewer: the layout on screen and the selected node.

use crate::config::LayoutConfig;
use crate::detail::{DisplayModel, project};
use crate::layout_response;
use crate::model::Layout;
use crate::single::layout_single;
use rpdgraph_core::DisciplineStore;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Error,
}

/// A user-facing message about a failed or noteworthy action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Info,
            message: message.into(),
        }
    }
}

/// Holds the layout currently displayed. Each applied layout replaces the previous one
/// entirely; a failed load leaves it untouched.
#[derive(Debug, Default)]
pub struct Session {
    config: LayoutConfig,
    layout: Layout,
    selected: Option<String>,
    generation: u64,
}

impl Session {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Number of layouts applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the displayed layout and clears the selection.
    pub fn apply(&mut self, layout: Layout) {
        self.layout = layout;
        self.selected = None;
        self.generation += 1;
    }

    /// Applies a successful result. On failure the current layout is kept and a notice is
    /// returned instead.
    pub fn apply_outcome<E: Display>(&mut self, outcome: Result<Layout, E>) -> Option<Notice> {
        match outcome {
            Ok(layout) => {
                self.apply(layout);
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "keeping previous layout");
                Some(Notice::error(err.to_string()))
            }
        }
    }

    /// Fetches one analyzed file and displays its single-discipline layout.
    pub async fn open_file<S: DisciplineStore>(&mut self, store: &S, id: &str) -> Option<Notice> {
        let outcome = store
            .fetch(id)
            .await
            .map(|resp| layout_single(&resp.metadata, &self.config))
            .map_err(|err| format!("Could not open {id}: {err}"));
        self.apply_outcome(outcome)
    }

    /// Fetches the comparison graph for `ids` and displays it.
    pub async fn open_multi<S: DisciplineStore>(
        &mut self,
        store: &S,
        ids: &[String],
    ) -> Option<Notice> {
        if ids.is_empty() {
            return Some(Notice::info("Select at least one file to compare"));
        }
        let outcome = store
            .multi_graph(ids)
            .await
            .map(|resp| layout_response(&resp, &self.config))
            .map_err(|err| format!("Could not build the comparison: {err}"));
        self.apply_outcome(outcome)
    }

    /// Selects a node of the current layout and returns its detail view. Unknown ids clear the
    /// selection.
    pub fn select(&mut self, id: &str) -> Option<DisplayModel> {
        let node = self.layout.node(id);
        self.selected = node.map(|n| n.id.clone());
        node.map(project)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Detail view of the selected node, if any.
    pub fn selection_detail(&self) -> Option<DisplayModel> {
        self.selected
            .as_deref()
            .and_then(|id| self.layout.node(id))
            .map(project)
    }
}
