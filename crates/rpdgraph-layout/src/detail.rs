//! Projection of a laid-out node into the fields a detail panel shows.

use crate::model::LayoutNode;
use rpdgraph_core::{Category, DisciplineSummary, EntryType, LiteratureEntry, NodeKind, NodePayload};
use rpdgraph_core::{SectionPayload, model::PLACEHOLDER};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursEntry {
    pub label: String,
    pub hours: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    /// An absolute URL.
    Link(String),
    Hours(Vec<HoursEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayField {
    pub label: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub kind: NodeKind,
    pub title: String,
    pub fields: Vec<DisplayField>,
}

impl DisplayModel {
    pub fn field(&self, label: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| &f.value)
    }
}

/// Whether `text` carries no information worth displaying.
pub fn is_blank_value(text: &str) -> bool {
    matches!(text.trim(), "" | PLACEHOLDER | "0")
}

struct Fields<'t> {
    title: &'t str,
    fields: Vec<DisplayField>,
}

impl<'t> Fields<'t> {
    fn new(title: &'t str) -> Self {
        Self {
            title,
            fields: Vec::new(),
        }
    }

    fn push(&mut self, label: &str, value: FieldValue) {
        if self.fields.iter().any(|f| f.label == label) {
            return;
        }
        self.fields.push(DisplayField {
            label: label.to_string(),
            value,
        });
    }

    fn text(&mut self, label: &str, text: &str) {
        let text = text.trim();
        if is_blank_value(text) || text == self.title {
            return;
        }
        self.push(label, FieldValue::Text(text.to_string()));
    }

    fn list(&mut self, label: &str, items: &[String]) {
        let items: Vec<String> = items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !is_blank_value(s))
            .map(str::to_string)
            .collect();
        if !items.is_empty() {
            self.push(label, FieldValue::List(items));
        }
    }

    /// A link when `text` parses as an absolute URL, plain text otherwise.
    fn link(&mut self, label: &str, text: &str) {
        let text = text.trim();
        if is_blank_value(text) {
            return;
        }
        match Url::parse(text) {
            Ok(url) if !url.cannot_be_a_base() => self.push(label, FieldValue::Link(url.into())),
            _ => self.text(label, text),
        }
    }

    fn finish(self) -> Vec<DisplayField> {
        self.fields
    }
}

fn discipline_fields(f: &mut Fields<'_>, d: &DisciplineSummary) {
    if let Some(tag) = d.category.as_deref() {
        f.text("Category", Category::from_tag(tag).display_name());
    }
    f.text("Direction", &d.direction);
    f.text("Program", &d.edu_program);
    f.text("Level", &d.edu_level);
    f.text("Period", &d.period);
    f.text("Volume", &d.volume);
    f.text("Volume details", &d.volume_details);
    f.text("Description", &d.description);
    f.text("Goals", &d.goals);
    f.list("Outcomes", &d.outcomes);
}

fn section_fields(f: &mut Fields<'_>, s: &SectionPayload) {
    let hours: Vec<HoursEntry> = s
        .hours
        .breakdown()
        .into_iter()
        .filter(|(_, h)| *h > 0)
        .map(|(label, hours)| HoursEntry {
            label: label.to_string(),
            hours,
        })
        .collect();
    if !hours.is_empty() {
        f.push("Hours", FieldValue::Hours(hours));
    }
    f.text("Content", &s.content);
    f.list("Software", &s.linked_software);
}

fn literature_fields(f: &mut Fields<'_>, entry: &LiteratureEntry) {
    f.text("Authors", &entry.authors.join(", "));
    f.text("Year", entry.year.as_deref().unwrap_or_default());
    f.text("Publisher", &entry.publisher);
    f.text("Pages", &entry.pages);
    f.text("DOI", &entry.doi);
    f.text("ISBN", &entry.isbn);
    f.link("URL", &entry.url);
    if entry.entry_type != EntryType::Unknown {
        f.text("Type", entry.entry_type.display_name());
    }
    if !entry.is_structured() {
        f.text("Reference", &entry.raw);
    }
}

fn title_of(node: &LayoutNode) -> String {
    let from_payload = match &node.payload {
        NodePayload::Discipline(d) => d.name.as_str(),
        NodePayload::Section(s) => s.name.as_str(),
        NodePayload::Software { name, .. } => name.as_str(),
        NodePayload::Direction { name, .. } => name.as_str(),
        NodePayload::Literature(entry) => entry.display_title(),
        NodePayload::SuperRoot { .. } => "",
    };
    let from_payload = from_payload.trim();
    if from_payload.is_empty() {
        node.label.trim().to_string()
    } else {
        from_payload.to_string()
    }
}

/// Builds the detail view of `node`. Empty, `"-"` and `"0"` values are left out, as is any field
/// that would just repeat the title.
pub fn project(node: &LayoutNode) -> DisplayModel {
    let title = title_of(node);
    let mut f = Fields::new(&title);
    match &node.payload {
        NodePayload::Discipline(d) => discipline_fields(&mut f, d),
        NodePayload::Section(s) => section_fields(&mut f, s),
        NodePayload::Software { category, .. } => f.text("Category", category.display_name()),
        NodePayload::Literature(entry) => literature_fields(&mut f, entry),
        NodePayload::Direction { count, .. } | NodePayload::SuperRoot { count } => {
            f.text("Disciplines", &count.to_string())
        }
    }
    let fields = f.finish();
    DisplayModel {
        kind: node.kind,
        title,
        fields,
    }
}
