use rpdgraph_core::{DisciplineMetadata, NodeKind};
use rpdgraph_layout::{FieldValue, HoursEntry, Layout, LayoutConfig, layout_single, project};
use std::collections::HashSet;
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn layout_of(name: &str) -> Layout {
    let path = workspace_root()
        .join("fixtures")
        .join("discipline")
        .join(name);
    let text = std::fs::read_to_string(&path).expect("fixture");
    let data = DisciplineMetadata::from_json_str(&text).expect("metadata");
    layout_single(&data, &LayoutConfig::default())
}

fn text(value: Option<&FieldValue>) -> Option<&str> {
    match value {
        Some(FieldValue::Text(s)) => Some(s.as_str()),
        _ => None,
    }
}

#[test]
fn discipline_detail_lists_metadata() {
    let layout = layout_of("basic.json");
    let model = project(layout.node("root").expect("root"));

    assert_eq!(model.kind, NodeKind::Discipline);
    assert_eq!(model.title, "Базы данных");
    assert_eq!(text(model.field("Category")), Some("Technical"));
    assert_eq!(text(model.field("Period")), Some("5 семестр"));
    assert_eq!(text(model.field("Volume")), Some("144"));
    assert_eq!(text(model.field("Level")), Some("бакалавриат"));

    let Some(FieldValue::List(outcomes)) = model.field("Outcomes") else {
        panic!("expected outcomes list");
    };
    assert_eq!(outcomes.len(), 2, "blank outcomes are dropped");
}

#[test]
fn placeholder_values_are_omitted() {
    let layout = layout_of("empty.json");
    let model = project(layout.node("root").expect("root"));

    assert_eq!(model.title, "Философия");
    assert_eq!(text(model.field("Category")), Some("Humanities"));
    assert!(model.field("Period").is_none());
    assert!(model.field("Volume").is_none());
    assert!(model.field("Outcomes").is_none());
    assert!(model.field("Direction").is_none());
}

#[test]
fn section_detail_shows_positive_hours_only() {
    let layout = layout_of("basic.json");
    let model = project(layout.node("sec-2").expect("section"));

    assert_eq!(model.title, "Раздел 3. Проектирование баз данных");
    let Some(FieldValue::Hours(hours)) = model.field("Hours") else {
        panic!("expected hours");
    };
    let expected = [("Lectures", 4), ("Practice", 4), ("Self-study", 8)]
        .into_iter()
        .map(|(label, hours)| HoursEntry {
            label: label.to_string(),
            hours,
        })
        .collect::<Vec<_>>();
    assert_eq!(hours, &expected);
    assert_eq!(text(model.field("Content")), Some("ER-диаграммы, нормальные формы"));

    let Some(FieldValue::List(software)) = model.field("Software") else {
        panic!("expected linked software");
    };
    assert_eq!(software, &vec!["draw.io".to_string(), "Visio".to_string()]);
}

#[test]
fn literature_detail_links_absolute_urls() {
    let layout = layout_of("basic.json");

    let ebs = project(layout.node("lm-1").expect("literature"));
    assert_eq!(ebs.kind, NodeKind::LitMain);
    assert_eq!(ebs.title, "Базы данных");
    assert_eq!(
        ebs.field("URL"),
        Some(&FieldValue::Link("https://e.lanbook.com/book/12345".to_string()))
    );
    assert_eq!(text(ebs.field("Year")), Some("2012"));
    assert_eq!(text(ebs.field("Type")), Some("Electronic library"));
    assert_eq!(text(ebs.field("Authors")), Some("Кузнецов С. Д."));

    let book = project(layout.node("lm-0").expect("literature"));
    assert_eq!(text(book.field("ISBN")), Some("5-8459-0788-8"));
    assert_eq!(text(book.field("Pages")), Some("1328"));
    assert!(book.field("URL").is_none());
}

#[test]
fn plain_reference_is_not_repeated() {
    let layout = layout_of("basic.json");

    let plain = project(layout.node("lm-2").expect("literature"));
    assert!(plain.title.starts_with("Карпова Т. С."));
    assert!(plain.fields.is_empty());

    let standard = project(layout.node("la-2").expect("literature"));
    assert!(standard.title.starts_with("ГОСТ 34.602-2020"));
    assert!(standard.field("DOI").is_none(), "placeholder DOI is omitted");
    assert!(standard.field("Reference").is_none());
    assert_eq!(text(standard.field("Type")), Some("Standard"));
}

#[test]
fn software_detail_shows_category() {
    let layout = layout_of("basic.json");
    let model = project(layout.node("sw-3").expect("software"));
    assert_eq!(model.title, "Git");
    assert_eq!(text(model.field("Category")), Some("Technical"));
}

#[test]
fn no_field_is_shown_twice_or_repeats_the_title() {
    let layout = layout_of("basic.json");
    for node in &layout.nodes {
        let model = project(node);
        let labels: HashSet<&str> = model.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels.len(), model.fields.len(), "{}", node.id);
        for field in &model.fields {
            if let FieldValue::Text(value) = &field.value {
                assert_ne!(value, &model.title, "{} repeats its title", node.id);
                assert!(!matches!(value.trim(), "" | "-" | "0"));
            }
        }
    }
}

#[test]
fn relative_urls_stay_text() {
    let data = DisciplineMetadata::from_value(serde_json::json!({
        "name": "Сети",
        "literature": {
            "main": [{ "title": "RFC 791", "url": "www.rfc-editor.org/rfc/rfc791" }]
        }
    }))
    .unwrap();
    let layout = layout_single(&data, &LayoutConfig::default());
    let model = project(layout.node("lm-0").expect("literature"));
    assert_eq!(text(model.field("URL")), Some("www.rfc-editor.org/rfc/rfc791"));
}
