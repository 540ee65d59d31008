use rpdgraph_core::{
    DisciplineMetadata, GraphEdge, GraphNode, MultiGraphResponse, NodeKind, build_multi_graph,
};
use rpdgraph_layout::palette::{HUMANITARIAN, TECHNICAL};
use rpdgraph_layout::{EdgeKind, Layout, LayoutConfig, layout_multi, layout_response};
use std::collections::HashSet;
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn read_fixture(parts: &[&str]) -> String {
    let path = parts
        .iter()
        .fold(workspace_root().join("fixtures"), |p, part| p.join(part));
    std::fs::read_to_string(&path).expect("fixture")
}

fn discipline(name: &str) -> DisciplineMetadata {
    DisciplineMetadata::from_json_str(&read_fixture(&["discipline", name])).expect("metadata")
}

fn shared_response() -> MultiGraphResponse {
    serde_json::from_str(&read_fixture(&["multi", "shared.json"])).expect("response")
}

fn assert_no_dangling_edges(layout: &Layout) {
    let ids: HashSet<&str> = layout.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), layout.nodes.len(), "node ids must be unique");
    for e in &layout.edges {
        assert!(ids.contains(e.source.as_str()), "dangling source in {}", e.id);
        assert!(ids.contains(e.target.as_str()), "dangling target in {}", e.id);
    }
}

#[test]
fn shared_section_gets_one_high_contrast_edge() {
    let response = shared_response();
    let layout = layout_response(&response, &LayoutConfig::default());

    let shared: Vec<_> = layout.edges_of(EdgeKind::SharedSection).collect();
    assert_eq!(shared.len(), 1, "dangling shared edge must be dropped");
    let edge = shared[0];
    assert_eq!(edge.source, "d0-0-sec-0");
    assert_eq!(edge.target, "d0-1-sec-0");
    assert!(edge.animated);
    assert!(edge.is_dashed());
    assert_eq!(edge.style.stroke, "#e11d48");
    assert_eq!(edge.style.stroke_width, 3.0);
    assert_eq!(edge.label.as_deref(), Some("shared section"));

    // Each section keeps its own hierarchy edge.
    for (root, sec) in [("d0-0-root", "d0-0-sec-0"), ("d0-1-root", "d0-1-sec-0")] {
        assert!(
            layout
                .edges_of(EdgeKind::Hierarchy)
                .any(|e| e.source == root && e.target == sec),
            "missing hierarchy edge {root} -> {sec}"
        );
    }

    assert_no_dangling_edges(&layout);
}

#[test]
fn multi_layout_recovers_branches_from_edges() {
    let response = shared_response();
    let layout = layout_response(&response, &LayoutConfig::default());

    assert_eq!(layout.nodes.len(), response.graph_nodes.len());
    assert_eq!(layout.nodes_of(NodeKind::SuperRoot).count(), 1);
    assert_eq!(layout.nodes_of(NodeKind::Direction).count(), 1);
    assert_eq!(layout.nodes_of(NodeKind::Discipline).count(), 2);

    let uses = layout
        .edges
        .iter()
        .find(|e| e.target == "d0-0-sw-0")
        .expect("software edge");
    assert_eq!(uses.source, "d0-0-sec-1");
    assert_eq!(uses.kind, EdgeKind::SectionSoftware);

    let general = layout
        .edges
        .iter()
        .find(|e| e.target == "d0-1-sw-0")
        .expect("general tool edge");
    assert_eq!(general.source, "d0-1-root");
    assert_eq!(general.kind, EdgeKind::GeneralTool);

    let lit = layout
        .edges
        .iter()
        .find(|e| e.target == "d0-0-lm-0")
        .expect("literature edge");
    assert_eq!(lit.kind, EdgeKind::MainLiterature);
    assert_eq!(lit.label.as_deref(), Some("main literature"));
}

#[test]
fn discipline_colors_fall_back_to_metadata() {
    let response = shared_response();
    let layout = layout_response(&response, &LayoutConfig::default());

    // Node payload carries category and period: technical, "5 семестр".
    let db = layout.node("d0-0-root").expect("discipline");
    assert_eq!(db.style.fill, TECHNICAL.shades[4]);

    // Bare payload: humanitarian, "6 семестр" come from the metadata list.
    let is = layout.node("d0-1-root").expect("discipline");
    assert_eq!(is.style.fill, HUMANITARIAN.shades[3]);
    let sec = layout.node("d0-1-sec-0").expect("section");
    assert_eq!(sec.style.fill, HUMANITARIAN.light);
}

#[test]
fn directions_and_disciplines_form_rows() {
    let config = LayoutConfig::default();
    let disciplines = vec![
        discipline("basic.json"),
        discipline("information_systems.json"),
        discipline("history.json"),
    ];
    let (nodes, edges) = build_multi_graph(&disciplines);
    let layout = layout_multi(&disciplines, &nodes, &edges, &config);

    let root = layout.node("super-root").expect("super root");
    assert_eq!((root.x, root.y), (0.0, 0.0));

    let d00 = layout.node("d0-0-root").expect("discipline");
    let d01 = layout.node("d0-1-root").expect("discipline");
    let pitch = d01.x - d00.x;
    assert!(pitch >= config.discipline_spacing);

    let spacing = config.direction_spacing.max(2.0 * pitch);
    let dir0 = layout.node("dir-0").expect("direction");
    let dir1 = layout.node("dir-1").expect("direction");
    assert_eq!(dir0.y, config.direction_row_y);
    assert_eq!(dir1.y, config.direction_row_y);
    assert!((dir1.x - dir0.x - spacing).abs() < 1e-6);

    let row = config.direction_row_y + config.discipline_row_offset;
    for id in ["d0-0-root", "d0-1-root", "d1-0-root"] {
        assert_eq!(layout.node(id).expect("discipline").y, row);
    }
    assert!((((d00.x + d01.x) / 2.0) - dir0.x).abs() < 1e-6);

    // Every graph node and edge survives, shared section included.
    assert_eq!(layout.nodes.len(), nodes.len());
    assert_eq!(layout.edges.len(), edges.len());
    assert_no_dangling_edges(&layout);
}

fn wide_discipline(name: &str, tools: &[&str]) -> DisciplineMetadata {
    let sections = (0..10)
        .map(|i| serde_json::json!({ "name": format!("{name}: тема {i}") }))
        .collect::<Vec<_>>();
    DisciplineMetadata::from_value(serde_json::json!({
        "name": name,
        "direction": "09.03.01 Информатика",
        "sections": sections,
        "software": tools,
    }))
    .expect("metadata")
}

#[test]
fn dense_disciplines_do_not_overlap() {
    let config = LayoutConfig::default();
    let disciplines = vec![
        wide_discipline("Алгоритмы", &["Git", "Docker"]),
        wide_discipline("Компиляторы", &[]),
        wide_discipline("Операционные системы", &["QEMU"]),
    ];
    let (nodes, edges) = build_multi_graph(&disciplines);
    let layout = layout_multi(&disciplines, &nodes, &edges, &config);

    let owner = |id: &str| id.split('-').take(2).collect::<Vec<_>>().join("-");
    let placed: Vec<_> = layout
        .nodes
        .iter()
        .filter(|n| n.id.starts_with("d0-"))
        .collect();
    assert_eq!(placed.len(), 3 + 30 + 3);

    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            if owner(&a.id) == owner(&b.id) {
                continue;
            }
            let apart_x = (a.x - b.x).abs() >= (a.width + b.width) / 2.0;
            let apart_y = (a.y - b.y).abs() >= (a.height + b.height) / 2.0;
            assert!(apart_x || apart_y, "{} overlaps {}", a.id, b.id);
        }
    }
}

#[test]
fn reciprocal_shared_links_draw_one_edge() {
    let response = shared_response();
    let mut edges = response.graph_edges.clone();
    edges.push(GraphEdge::labeled("d0-1-sec-0", "d0-0-sec-0", "shared section"));
    let layout = layout_multi(
        &response.disciplines,
        &response.graph_nodes,
        &edges,
        &LayoutConfig::default(),
    );

    let shared: Vec<_> = layout.edges_of(EdgeKind::SharedSection).collect();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].source, "d0-0-sec-0");
}

#[test]
fn shared_sections_found_by_the_graph_builder_are_drawn() {
    let disciplines = vec![
        discipline("basic.json"),
        discipline("information_systems.json"),
    ];
    let response = MultiGraphResponse::build(disciplines);
    let layout = layout_response(&response, &LayoutConfig::default());

    let shared: Vec<_> = layout.edges_of(EdgeKind::SharedSection).collect();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].source, "d0-0-sec-2");
    assert_eq!(shared[0].target, "d0-1-sec-1");
    assert!(shared[0].animated);
}

#[test]
fn sub_layout_matches_single_mode_relative_to_the_anchor() {
    let config = LayoutConfig::default();
    let data = discipline("basic.json");
    let single = rpdgraph_layout::layout_single(&data, &config);

    let response = MultiGraphResponse::build(vec![data]);
    let multi = layout_response(&response, &config);
    let anchor = multi.node("d0-0-root").expect("discipline");

    for i in 0..4 {
        let s = single.node(&format!("sec-{i}")).expect("single section");
        let m = multi.node(&format!("d0-0-sec-{i}")).expect("multi section");
        assert!((m.x - anchor.x - s.x).abs() < 1e-6);
        assert!((m.y - anchor.y - s.y).abs() < 1e-6);
    }
}

#[test]
fn orphan_disciplines_are_still_placed() {
    let nodes: Vec<GraphNode> = serde_json::from_value(serde_json::json!([
        { "id": "a", "label": "Физика", "type": "discipline", "data": { "name": "Физика" } },
        { "id": "a-sec", "label": "Механика", "type": "section", "data": { "name": "Механика" } }
    ]))
    .expect("nodes");
    let edges = vec![
        GraphEdge::new("a", "a-sec"),
        GraphEdge::new("a", "missing"),
        GraphEdge::new("ghost", "a-sec"),
    ];
    let layout = layout_multi(&[], &nodes, &edges, &LayoutConfig::default());

    assert_eq!(layout.nodes.len(), 2);
    assert_eq!(layout.edges.len(), 1);
    assert_no_dangling_edges(&layout);
}

#[test]
fn empty_graph_yields_empty_layout() {
    let layout = layout_multi(&[], &[], &[], &LayoutConfig::default());
    assert!(layout.nodes.is_empty());
    assert!(layout.edges.is_empty());
    assert!(layout.bounds.is_none());
}
