//! Radial placement of one discipline's branches around an anchor point.
//!
//! Sections fan out on an arc below the discipline, software sits just outside the section that
//! first references it, general tools form a column to the right and literature is tiled in a
//! two-column grid under the arc. Single mode anchors this at the origin; multi mode anchors it
//! at every discipline slot.

use crate::builder::{LayoutBuilder, NodeSpec, Point};
use crate::config::{LayoutConfig, NodeSize};
use crate::model::EdgeKind;
use crate::palette::ColorFamily;
use crate::style::style_node;
use crate::text::truncate_label;
use rpdgraph_core::{NodeKind, NodePayload};

pub(crate) const MAIN_LITERATURE_EDGE_LABEL: &str = "main literature";
pub(crate) const ADDITIONAL_LITERATURE_EDGE_LABEL: &str = "additional literature";

/// A node waiting to be placed. `label` is untruncated.
#[derive(Debug, Clone)]
pub(crate) struct Branch {
    pub id: String,
    pub label: String,
    pub payload: NodePayload,
}

#[derive(Debug, Clone)]
pub(crate) struct SectionBranch {
    pub node: Branch,
    /// Indices into [`Branches::software`] this section uses.
    pub software: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Branches {
    pub sections: Vec<SectionBranch>,
    pub software: Vec<Branch>,
    pub main_literature: Vec<Branch>,
    pub additional_literature: Vec<Branch>,
}

/// Angle in degrees (y-down, 0 = right, 90 = down) of section `i` out of `n`.
pub(crate) fn section_angle_deg(i: usize, n: usize, span_deg: f64) -> f64 {
    if n <= 1 {
        return 90.0;
    }
    let start = 90.0 + span_deg / 2.0;
    start - span_deg * i as f64 / (n - 1) as f64
}

/// For each software index, the sections referencing it in section order. Out-of-range links
/// are ignored.
fn reverse_index(sections: &[SectionBranch], software_len: usize) -> Vec<Vec<usize>> {
    let mut used_by: Vec<Vec<usize>> = vec![Vec::new(); software_len];
    for (si, section) in sections.iter().enumerate() {
        for &sw in &section.software {
            if let Some(list) = used_by.get_mut(sw) {
                if !list.contains(&si) {
                    list.push(si);
                }
            }
        }
    }
    used_by
}

/// Positions of every branch node around `center`, computed without placing anything.
struct Plan {
    sections: Vec<Point>,
    software: Vec<Point>,
    used_by: Vec<Vec<usize>>,
    main_literature: Vec<Point>,
    additional_literature: Vec<Point>,
}

impl Plan {
    fn new(center: Point, branches: &Branches, config: &LayoutConfig) -> Self {
        let n = branches.sections.len();
        let radius = config.section_radius(n);

        let sections: Vec<Point> = (0..n)
            .map(|i| {
                let theta = section_angle_deg(i, n, config.section_arc_span_deg).to_radians();
                Point::new(
                    center.x + radius * theta.cos(),
                    center.y + radius * theta.sin(),
                )
            })
            .collect();
        let used_by = reverse_index(&branches.sections, branches.software.len());

        let mut anchored = vec![0usize; n];
        let mut general = 0usize;
        let software = used_by
            .iter()
            .map(|sections_using| match sections_using.first() {
                Some(&si) => {
                    let s = sections[si];
                    let (dx, dy) = (s.x - center.x, s.y - center.y);
                    let len = dx.hypot(dy);
                    let (ux, uy) = if len > f64::EPSILON {
                        (dx / len, dy / len)
                    } else {
                        (0.0, 1.0)
                    };
                    let k = anchored[si];
                    anchored[si] += 1;
                    let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                    let step = sign * config.software_spread * (k / 2 + 1) as f64;
                    Point::new(
                        s.x + ux * config.software_offset - uy * step,
                        s.y + uy * config.software_offset + ux * step,
                    )
                }
                None => {
                    let at = Point::new(
                        center.x + radius + config.software_column_gap,
                        center.y + general as f64 * config.software_row_spacing,
                    );
                    general += 1;
                    at
                }
            })
            .collect();

        let top = if n == 0 {
            center.y + config.literature_top_gap
        } else {
            center.y + radius + config.literature_top_gap
        };
        let grid = |count: usize, row0: usize| -> Vec<Point> {
            (0..count)
                .map(|i| {
                    let row = row0 + i / 2;
                    let col = (i % 2) as f64;
                    Point::new(
                        center.x + (col - 0.5) * config.literature_column_spacing,
                        top + row as f64 * config.literature_row_spacing,
                    )
                })
                .collect()
        };
        let main_shown = branches
            .main_literature
            .len()
            .min(config.main_literature_cap);
        let additional_shown = branches
            .additional_literature
            .len()
            .min(config.additional_literature_cap);

        Self {
            sections,
            software,
            used_by,
            main_literature: grid(main_shown, 0),
            additional_literature: grid(additional_shown, main_shown.div_ceil(2)),
        }
    }
}

/// How far the branches of a node at the origin reach to the left and to the right, node
/// boxes included. The anchor node itself is not counted.
pub(crate) fn horizontal_reach(branches: &Branches, config: &LayoutConfig) -> (f64, f64) {
    let plan = Plan::new(Point::ORIGIN, branches, config);
    let boxes = [
        (&plan.sections, config.section_size),
        (&plan.software, config.software_size),
        (&plan.main_literature, config.literature_size),
        (&plan.additional_literature, config.literature_size),
    ];
    boxes
        .iter()
        .flat_map(|(points, size)| points.iter().map(move |p| (p.x, size.width / 2.0)))
        .fold((0.0_f64, 0.0_f64), |(left, right), (x, half)| {
            (left.max(half - x), right.max(x + half))
        })
}

/// Places `branches` around the already placed node `root_id` at `center`.
pub(crate) fn place_branches(
    out: &mut LayoutBuilder,
    root_id: &str,
    center: Point,
    branches: &Branches,
    family: &ColorFamily,
    config: &LayoutConfig,
) {
    let plan = Plan::new(center, branches, config);

    for (section, &at) in branches.sections.iter().zip(&plan.sections) {
        out.add_node(spec_for(
            &section.node,
            NodeKind::Section,
            at,
            config.section_size,
            config.section_label_chars,
            family,
        ));
        out.add_edge(
            root_id,
            &section.node.id,
            EdgeKind::Hierarchy,
            None,
            Some(family),
        );
    }

    for ((software, &at), sections_using) in branches
        .software
        .iter()
        .zip(&plan.software)
        .zip(&plan.used_by)
    {
        if !out.add_node(spec_for(
            software,
            NodeKind::Software,
            at,
            config.software_size,
            config.software_label_chars,
            family,
        )) {
            continue;
        }
        if sections_using.is_empty() {
            out.add_edge(
                root_id,
                &software.id,
                EdgeKind::GeneralTool,
                None,
                Some(family),
            );
        } else {
            for &si in sections_using {
                let section_id = &branches.sections[si].node.id;
                out.add_edge(
                    section_id,
                    &software.id,
                    EdgeKind::SectionSoftware,
                    None,
                    Some(family),
                );
            }
        }
    }

    let groups = [
        (
            &branches.main_literature,
            &plan.main_literature,
            NodeKind::LitMain,
            EdgeKind::MainLiterature,
            MAIN_LITERATURE_EDGE_LABEL,
        ),
        (
            &branches.additional_literature,
            &plan.additional_literature,
            NodeKind::LitAdd,
            EdgeKind::AdditionalLiterature,
            ADDITIONAL_LITERATURE_EDGE_LABEL,
        ),
    ];
    for (entries, points, kind, edge_kind, first_label) in groups {
        if entries.len() > points.len() {
            tracing::debug!(
                root = %root_id,
                kind = kind.as_str(),
                dropped = entries.len() - points.len(),
                "literature over cap"
            );
        }
        let mut labeled = false;
        for (entry, &at) in entries.iter().zip(points) {
            if !out.add_node(spec_for(
                entry,
                kind,
                at,
                config.literature_size,
                config.literature_label_chars,
                family,
            )) {
                continue;
            }
            let label = (!labeled).then_some(first_label);
            if out.add_edge(root_id, &entry.id, edge_kind, label, Some(family)) {
                labeled = true;
            }
        }
    }
}
