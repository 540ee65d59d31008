use crate::*;
use futures::executor::block_on;
use serde_json::json;

fn discipline(name: &str, direction: &str, sections: &[&str]) -> DisciplineMetadata {
    DisciplineMetadata {
        name: name.to_string(),
        direction: direction.to_string(),
        sections: sections
            .iter()
            .map(|s| Section {
                name: s.to_string(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

#[test]
fn memory_store_lists_newest_first_and_fetches_graphs() {
    let store = MemoryStore::new();
    let a = store.insert("a.docx", 100, discipline("Algorithms", "CS", &["Sorting"]));
    let b = store.insert("b.pdf", 200, discipline("Ethics", "", &[]));
    assert_ne!(a.id, b.id);

    let files = block_on(store.list_files()).unwrap();
    let ids: Vec<&str> = files.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec![b.id.as_str(), a.id.as_str()]);
    assert_eq!(files[1].discipline_name, "Algorithms");
    assert_eq!(files[1].status, "processed");

    let resp = block_on(store.fetch(&a.id)).unwrap();
    assert_eq!(resp.file_id, a.id);
    assert_eq!(resp.metadata.name, "Algorithms");
    assert_eq!(resp.graph_nodes.len(), 2);
    assert_eq!(resp.graph_edges.len(), 1);
}

#[test]
fn memory_store_delete_then_fetch_is_not_found() {
    let store = MemoryStore::new();
    let info = store.insert("a.docx", 1, discipline("Algorithms", "CS", &[]));
    block_on(store.delete(&info.id)).unwrap();
    let err = block_on(store.fetch(&info.id)).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(block_on(store.list_files()).unwrap().is_empty());
}

#[test]
fn memory_store_multi_graph_skips_unknown_ids() {
    let store = MemoryStore::new();
    let a = store.insert("a", 1, discipline("Databases", "CS", &["Реляционная модель"]));
    let b = store.insert("b", 1, discipline("Data Eng", "DS", &["Реляционная модель"]));

    let ids = vec![a.id.clone(), "missing".to_string(), b.id.clone()];
    let resp = block_on(store.multi_graph(&ids)).unwrap();
    assert_eq!(resp.disciplines.len(), 2);
    assert_eq!(
        resp.graph_edges
            .iter()
            .filter(|e| e.is_shared_section())
            .count(),
        1
    );

    let err = block_on(store.multi_graph(&["nope".to_string()])).unwrap_err();
    assert!(matches!(err, Error::NoneFound { .. }));
}

#[test]
fn responses_deserialize_leniently() {
    let resp: MultiGraphResponse = serde_json::from_value(json!({
        "disciplines": [{ "name": "A" }],
        "graph_nodes": [
            { "id": "super-root", "label": "Disciplines", "type": "super_root", "data": { "count": 1 } },
            { "id": "weird", "label": "?", "type": "planet" }
        ],
        "graph_edges": [
            { "source": "super-root", "target": "dir-0", "label": null },
            { "source": "x" }
        ]
    }))
    .unwrap();
    assert_eq!(resp.disciplines.len(), 1);
    assert_eq!(resp.graph_nodes.len(), 1);
    assert_eq!(resp.graph_edges.len(), 1);
    assert_eq!(resp.graph_edges[0].label, None);

    let info: FileInfo = serde_json::from_value(json!({
        "id": "f1",
        "filename": "rpd.docx",
        "file_size": "12",
        "category": "humanitarian"
    }))
    .unwrap();
    assert_eq!(info.file_size, 0);
    assert_eq!(info.status, "processed");
    assert_eq!(info.category, Category::Humanitarian);
}

#[test]
fn memory_store_never_reuses_deleted_ids() {
    let store = MemoryStore::new();
    let a = store.insert("a.docx", 1, discipline("Algorithms", "CS", &[]));
    let b = store.insert("b.docx", 1, discipline("Ethics", "", &[]));
    block_on(store.delete(&b.id)).unwrap();

    let c = store.insert("c.docx", 1, discipline("Physics", "", &[]));
    assert_ne!(c.id, a.id);
    assert_ne!(c.id, b.id);
    assert!(matches!(
        block_on(store.fetch(&b.id)).unwrap_err(),
        Error::NotFound { .. }
    ));
    assert_eq!(block_on(store.fetch(&c.id)).unwrap().metadata.name, "Physics");
}
