use crate::builder::{LayoutBuilder, NodeSpec, Point};
use crate::config::LayoutConfig;
use crate::model::Layout;
use crate::palette::{colors_for, shade_index_with_divisor};
use crate::radial::{Branch, Branches, SectionBranch, place_branches};
use crate::style::style_node;
use crate::text::{or_fallback, truncate_label};
use rpdgraph_core::model::UNTITLED;
use rpdgraph_core::{DisciplineMetadata, DisciplineSummary, NodeKind, NodePayload, SectionPayload};

pub const ROOT_ID: &str = "root";
pub(crate) const UNTITLED_SOURCE: &str = "Untitled source";
pub(crate) const UNTITLED_TOOL: &str = "Tool";

fn branches_of(data: &DisciplineMetadata) -> Branches {
    let sections: Vec<SectionBranch> = data
        .sections
        .iter()
        .enumerate()
        .map(|(i, sec)| SectionBranch {
            node: Branch {
                id: format!("sec-{i}"),
                label: if sec.name.trim().is_empty() {
                    format!("Section {}", i + 1)
                } else {
                    sec.name.clone()
                },
                payload: NodePayload::Section(SectionPayload {
                    name: sec.name.clone(),
                    content: sec.content.clone(),
                    hours: sec.hours,
                    index: i,
                    linked_software: sec.linked_software.clone(),
                    category: data.category,
                }),
            },
            software: sec
                .linked_software
                .iter()
                .filter_map(|name| data.software_index(name))
                .collect(),
        })
        .collect();

    let software: Vec<Branch> = data
        .software
        .iter()
        .enumerate()
        .map(|(j, name)| Branch {
            id: format!("sw-{j}"),
            label: or_fallback(name, UNTITLED_TOOL).to_string(),
            payload: NodePayload::Software {
                name: name.clone(),
                category: data.category,
            },
        })
        .collect();

    let literature = |entries: &[rpdgraph_core::LiteratureEntry], tag: &str| -> Vec<Branch> {
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| Branch {
                id: format!("{tag}-{i}"),
                label: or_fallback(entry.display_title(), UNTITLED_SOURCE).to_string(),
                payload: NodePayload::Literature(entry.clone()),
            })
            .collect()
    };

    Branches {
        sections,
        software,
        main_literature: literature(&data.literature.main, "lm"),
        additional_literature: literature(&data.literature.additional, "la"),
    }
}

/// Lays out one discipline: the discipline at the origin, sections on an arc below it,
/// software next to the sections using it and literature in a grid further down.
///
/// Total and deterministic: the same input always yields the same layout. Literature beyond
/// `main_literature_cap` / `additional_literature_cap` is silently left out.
pub fn layout_single(data: &DisciplineMetadata, config: &LayoutConfig) -> Layout {
    let family = colors_for(data.category);
    let shade = shade_index_with_divisor(&data.period, config.shade_count, config.shade_divisor);

    let mut out = LayoutBuilder::new();
    out.add_node(NodeSpec {
        id: ROOT_ID.to_string(),
        kind: NodeKind::Discipline,
        label: truncate_label(
            or_fallback(&data.name, UNTITLED),
            config.discipline_label_chars,
        ),
        at: Point::ORIGIN,
        size: config.discipline_size,
        style: style_node(NodeKind::Discipline, family, shade),
        payload: NodePayload::Discipline(DisciplineSummary::from(data)),
    });

    let branches = branches_of(data);
    place_branches(&mut out, ROOT_ID, Point::ORIGIN, &branches, family, config);

    let layout = out.finish();
    tracing::debug!(
        discipline = %data.name,
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        "single-discipline layout"
    );
    layout
}
