//! The typed node/edge graph exchanged with the analysis service, and the builders that derive
//! it from discipline metadata.

use crate::category::Category;
use crate::lenient;
use crate::model::{DisciplineMetadata, Hours, LiteratureEntry};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const SUPER_ROOT_ID: &str = "super-root";
pub const SHARED_SECTION_LABEL: &str = "shared section";
/// Label the original analysis backend emits for shared sections.
pub const SHARED_SECTION_LABEL_RU: &str = "общий раздел";
pub const USES_LABEL: &str = "uses";
pub const MAIN_LABEL: &str = "main";
pub const ADDITIONAL_LABEL: &str = "additional";
pub const NO_DIRECTION: &str = "No direction";

pub const MAX_MAIN_LITERATURE: usize = 6;
pub const MAX_ADDITIONAL_LITERATURE: usize = 5;

const DISCIPLINE_LABEL_CHARS: usize = 60;
const SECTION_LABEL_CHARS: usize = 50;
const SOFTWARE_LABEL_CHARS: usize = 30;
const LITERATURE_LABEL_CHARS: usize = 45;
const DIRECTION_LABEL_CHARS: usize = 40;
const SHARED_NAME_MIN_CHARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    SuperRoot,
    Direction,
    Discipline,
    Section,
    Software,
    LitMain,
    LitAdd,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::SuperRoot => "super_root",
            NodeKind::Direction => "direction",
            NodeKind::Discipline => "discipline",
            NodeKind::Section => "section",
            NodeKind::Software => "software",
            NodeKind::LitMain => "lit_main",
            NodeKind::LitAdd => "lit_add",
        }
    }

    pub fn is_literature(self) -> bool {
        matches!(self, NodeKind::LitMain | NodeKind::LitAdd)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub data: Value,
}

impl GraphNode {
    /// Typed view of `data` for this node's kind. Never fails; malformed data yields defaults.
    pub fn payload(&self) -> NodePayload {
        NodePayload::from_data(self.kind, &self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: None,
            style: None,
        }
    }

    pub fn labeled(source: impl Into<String>, target: impl Into<String>, label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            ..Self::new(source, target)
        }
    }

    pub fn is_shared_section(&self) -> bool {
        self.label.as_deref().is_some_and(is_shared_section_label)
    }
}

pub fn is_shared_section_label(label: &str) -> bool {
    let label = label.trim();
    label.eq_ignore_ascii_case(SHARED_SECTION_LABEL) || label == SHARED_SECTION_LABEL_RU
}

/// Display-relevant discipline fields carried on a discipline node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisciplineSummary {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub direction: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub edu_program: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub edu_level: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub volume: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub volume_details: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub period: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub goals: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub outcomes: Vec<String>,
}

impl DisciplineSummary {
    pub fn category(&self) -> Category {
        self.category
            .as_deref()
            .map(Category::from_tag)
            .unwrap_or_default()
    }
}

impl From<&DisciplineMetadata> for DisciplineSummary {
    fn from(m: &DisciplineMetadata) -> Self {
        Self {
            name: m.name.clone(),
            direction: m.direction.clone(),
            edu_program: m.edu_program.clone(),
            edu_level: m.edu_level.clone(),
            volume: m.volume.clone(),
            volume_details: m.volume_details.clone(),
            period: m.period.clone(),
            goals: m.goals.clone(),
            description: m.description.clone(),
            category: Some(m.category.as_str().to_string()),
            outcomes: m.outcomes.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionPayload {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub hours: Hours,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub index: usize,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub linked_software: Vec<String>,
    #[serde(default)]
    pub category: Category,
}

/// Kind-specific node data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NodePayload {
    SuperRoot {
        count: usize,
    },
    Direction {
        name: String,
        count: usize,
    },
    Discipline(DisciplineSummary),
    Section(SectionPayload),
    Software {
        name: String,
        category: Category,
    },
    Literature(LiteratureEntry),
}

impl NodePayload {
    pub fn from_data(kind: NodeKind, data: &Value) -> Self {
        let count = || {
            data.get("count")
                .and_then(Value::as_u64)
                .and_then(|c| usize::try_from(c).ok())
                .unwrap_or(0)
        };
        let text = |key: &str| data.get(key).map(lenient::coerce_string).unwrap_or_default();
        match kind {
            NodeKind::SuperRoot => NodePayload::SuperRoot { count: count() },
            NodeKind::Direction => NodePayload::Direction {
                name: text("name"),
                count: count(),
            },
            NodeKind::Discipline => {
                NodePayload::Discipline(DisciplineSummary::deserialize(data).unwrap_or_default())
            }
            NodeKind::Section => {
                NodePayload::Section(SectionPayload::deserialize(data).unwrap_or_default())
            }
            NodeKind::Software => NodePayload::Software {
                name: text("name"),
                category: data
                    .get("category")
                    .and_then(Value::as_str)
                    .map(Category::from_tag)
                    .unwrap_or_default(),
            },
            NodeKind::LitMain | NodeKind::LitAdd => {
                NodePayload::Literature(LiteratureEntry::deserialize(data).unwrap_or_default())
            }
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            NodePayload::Discipline(d) => Some(d.category()),
            NodePayload::Section(s) => Some(s.category),
            NodePayload::Software { category, .. } => Some(*category),
            NodePayload::SuperRoot { .. }
            | NodePayload::Direction { .. }
            | NodePayload::Literature(_) => None,
        }
    }
}

/// Truncates to at most `max_chars` characters (no ellipsis), as the analysis service does.
fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn to_data<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Builds the single-discipline graph. `prefix` namespaces every id (used by the multi graph).
pub fn build_graph(data: &DisciplineMetadata, prefix: &str) -> (Vec<GraphNode>, Vec<GraphEdge>) {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    let root_id = format!("{prefix}root");
    nodes.push(GraphNode {
        id: root_id.clone(),
        label: clip(&data.name, DISCIPLINE_LABEL_CHARS),
        kind: NodeKind::Discipline,
        data: to_data(&DisciplineSummary::from(data)),
    });

    for (i, sec) in data.sections.iter().enumerate() {
        let sid = format!("{prefix}sec-{i}");
        let payload = SectionPayload {
            name: sec.name.clone(),
            content: sec.content.clone(),
            hours: sec.hours,
            index: i,
            linked_software: sec.linked_software.clone(),
            category: data.category,
        };
        nodes.push(GraphNode {
            id: sid.clone(),
            label: clip(&sec.name, SECTION_LABEL_CHARS),
            kind: NodeKind::Section,
            data: to_data(&payload),
        });
        edges.push(GraphEdge::new(root_id.clone(), sid));
    }

    let software_node = |idx: usize, name: &str| GraphNode {
        id: format!("{prefix}sw-{idx}"),
        label: clip(name, SOFTWARE_LABEL_CHARS),
        kind: NodeKind::Software,
        data: json!({ "name": name, "category": data.category.as_str() }),
    };

    let mut sw_added = vec![false; data.software.len()];
    for (i, sec) in data.sections.iter().enumerate() {
        let sid = format!("{prefix}sec-{i}");
        for sw in &sec.linked_software {
            let Some(idx) = data.software_index(sw) else {
                continue;
            };
            if !sw_added[idx] {
                nodes.push(software_node(idx, sw));
                sw_added[idx] = true;
            }
            edges.push(GraphEdge::labeled(
                sid.clone(),
                format!("{prefix}sw-{idx}"),
                USES_LABEL,
            ));
        }
    }

    for (idx, sw) in data.software.iter().enumerate() {
        if sw_added[idx] {
            continue;
        }
        // Duplicate names share the first index; only that one is linked from sections.
        nodes.push(software_node(idx, sw));
        sw_added[idx] = true;
        edges.push(GraphEdge::new(root_id.clone(), format!("{prefix}sw-{idx}")));
    }

    let groups = [
        (
            &data.literature.main,
            MAX_MAIN_LITERATURE,
            "lm",
            NodeKind::LitMain,
            MAIN_LABEL,
        ),
        (
            &data.literature.additional,
            MAX_ADDITIONAL_LITERATURE,
            "la",
            NodeKind::LitAdd,
            ADDITIONAL_LABEL,
        ),
    ];
    for (entries, cap, tag, kind, first_label) in groups {
        for (i, lit) in entries.iter().take(cap).enumerate() {
            let lid = format!("{prefix}{tag}-{i}");
            nodes.push(GraphNode {
                id: lid.clone(),
                label: clip(lit.display_title(), LITERATURE_LABEL_CHARS),
                kind,
                data: to_data(lit),
            });
            edges.push(if i == 0 {
                GraphEdge::labeled(root_id.clone(), lid, first_label)
            } else {
                GraphEdge::new(root_id.clone(), lid)
            });
        }
    }

    (nodes, edges)
}

fn section_prefix_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:раздел|тема|модуль|section|topic|module)\s+\d+\.?\s*[:.]?\s*")
            .expect("valid regex")
    })
}

/// Normalizes a section name for cross-discipline comparison: lower-cased, trimmed, with a
/// leading "Section N." style prefix removed.
pub fn normalize_section_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let lower = lower.trim();
    section_prefix_regex().replace(lower, "").trim().to_string()
}

/// Pairs of section node ids whose normalized names match. Names of five characters or fewer
/// are too generic to count.
pub fn shared_section_pairs(nodes: &[GraphNode]) -> Vec<(String, String)> {
    let mut by_name: IndexMap<String, Vec<&str>> = IndexMap::new();
    for node in nodes.iter().filter(|n| n.kind == NodeKind::Section) {
        let name = node
            .data
            .get("name")
            .map(lenient::coerce_string)
            .unwrap_or_else(|| node.label.clone());
        let norm = normalize_section_name(&name);
        if norm.chars().count() > SHARED_NAME_MIN_CHARS {
            by_name.entry(norm).or_default().push(node.id.as_str());
        }
    }

    let mut pairs = Vec::new();
    for ids in by_name.values().filter(|ids| ids.len() > 1) {
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                pairs.push((ids[i].to_string(), ids[j].to_string()));
            }
        }
    }
    pairs
}

/// Builds the comparison graph for several disciplines grouped by direction.
pub fn build_multi_graph(disciplines: &[DisciplineMetadata]) -> (Vec<GraphNode>, Vec<GraphEdge>) {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    if disciplines.is_empty() {
        return (nodes, edges);
    }

    nodes.push(GraphNode {
        id: SUPER_ROOT_ID.to_string(),
        label: "Disciplines".to_string(),
        kind: NodeKind::SuperRoot,
        data: json!({ "count": disciplines.len() }),
    });

    let mut directions: IndexMap<&str, Vec<&DisciplineMetadata>> = IndexMap::new();
    for disc in disciplines {
        let key = disc.direction_key().unwrap_or(NO_DIRECTION);
        directions.entry(key).or_default().push(disc);
    }

    for (dir_idx, (dir_name, dir_discs)) in directions.iter().enumerate() {
        let dir_id = format!("dir-{dir_idx}");
        nodes.push(GraphNode {
            id: dir_id.clone(),
            label: clip(dir_name, DIRECTION_LABEL_CHARS),
            kind: NodeKind::Direction,
            data: json!({ "name": dir_name, "count": dir_discs.len() }),
        });
        edges.push(GraphEdge::new(SUPER_ROOT_ID, dir_id.clone()));

        for (disc_idx, disc) in dir_discs.iter().enumerate() {
            let prefix = format!("d{dir_idx}-{disc_idx}-");
            let (disc_nodes, disc_edges) = build_graph(disc, &prefix);
            nodes.extend(disc_nodes);
            edges.extend(disc_edges);
            edges.push(GraphEdge::new(dir_id.clone(), format!("{prefix}root")));
        }
    }

    let pairs = shared_section_pairs(&nodes);
    tracing::debug!(
        disciplines = disciplines.len(),
        directions = directions.len(),
        shared = pairs.len(),
        "built multi-discipline graph"
    );
    for (a, b) in pairs {
        edges.push(GraphEdge::labeled(a, b, SHARED_SECTION_LABEL));
    }

    (nodes, edges)
}
