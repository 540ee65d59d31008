//! Discipline metadata as delivered by the document analyzer.

use crate::category::Category;
use crate::lenient;
use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled";
pub const PLACEHOLDER: &str = "-";

fn untitled() -> String {
    UNTITLED.to_string()
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineMetadata {
    #[serde(default = "untitled", deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub direction: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub edu_program: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub edu_level: String,
    #[serde(default = "placeholder", deserialize_with = "lenient::string")]
    pub period: String,
    #[serde(default = "placeholder", deserialize_with = "lenient::string")]
    pub volume: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub volume_details: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub goals: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, deserialize_with = "lenient::lenient_list")]
    pub sections: Vec<Section>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub outcomes: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub software: Vec<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub literature: LiteratureList,
}

impl Default for DisciplineMetadata {
    fn default() -> Self {
        Self {
            name: untitled(),
            direction: String::new(),
            edu_program: String::new(),
            edu_level: String::new(),
            period: placeholder(),
            volume: placeholder(),
            volume_details: String::new(),
            goals: String::new(),
            description: String::new(),
            category: Category::default(),
            sections: Vec::new(),
            outcomes: Vec::new(),
            software: Vec::new(),
            literature: LiteratureList::default(),
        }
    }
}

impl DisciplineMetadata {
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The grouping key used by the multi-discipline graph: direction, else program.
    pub fn direction_key(&self) -> Option<&str> {
        [self.direction.trim(), self.edu_program.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
    }

    /// Index of `name` in the software list (exact match, first occurrence).
    pub fn software_index(&self, name: &str) -> Option<usize> {
        self.software.iter().position(|s| s == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub hours: Hours,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub linked_software: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hours {
    #[serde(default, deserialize_with = "lenient::hours")]
    pub lectures: u32,
    #[serde(default, deserialize_with = "lenient::hours")]
    pub practice: u32,
    #[serde(default, deserialize_with = "lenient::hours")]
    pub labs: u32,
    #[serde(default, deserialize_with = "lenient::hours")]
    pub self_study: u32,
}

impl Hours {
    pub fn total(&self) -> u32 {
        self.lectures
            .saturating_add(self.practice)
            .saturating_add(self.labs)
            .saturating_add(self.self_study)
    }

    /// `(label, hours)` pairs in display order.
    pub fn breakdown(&self) -> [(&'static str, u32); 4] {
        [
            ("Lectures", self.lectures),
            ("Practice", self.practice),
            ("Labs", self.labs),
            ("Self-study", self.self_study),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiteratureList {
    #[serde(default, deserialize_with = "lenient::lenient_list")]
    pub main: Vec<LiteratureEntry>,
    #[serde(default, deserialize_with = "lenient::lenient_list")]
    pub additional: Vec<LiteratureEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Book,
    Article,
    Web,
    Ebs,
    Standard,
    Thesis,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EntryType {
    pub fn display_name(self) -> &'static str {
        match self {
            EntryType::Book => "Book",
            EntryType::Article => "Article",
            EntryType::Web => "Web resource",
            EntryType::Ebs => "Electronic library",
            EntryType::Standard => "Standard",
            EntryType::Thesis => "Thesis",
            EntryType::Unknown => "Unknown",
        }
    }
}

/// One bibliography entry. Plain strings are accepted and land in `raw`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LiteratureRepr")]
pub struct LiteratureEntry {
    pub raw: String,
    pub number: Option<String>,
    pub authors: Vec<String>,
    pub title: String,
    pub year: Option<String>,
    pub publisher: String,
    pub pages: String,
    pub url: String,
    pub doi: String,
    pub isbn: String,
    pub entry_type: EntryType,
}

impl LiteratureEntry {
    pub fn plain(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Default::default()
        }
    }

    /// Whether the analyzer extracted anything beyond the raw text.
    pub fn is_structured(&self) -> bool {
        !self.title.trim().is_empty()
            || !self.authors.is_empty()
            || !self.publisher.trim().is_empty()
            || self.year.as_deref().is_some_and(|y| !y.trim().is_empty())
    }

    /// Title when present, otherwise the raw text.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            self.raw.trim()
        } else {
            self.title.trim()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LiteratureRepr {
    Plain(String),
    Structured(LiteratureRecord),
}

#[derive(Deserialize)]
struct LiteratureRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    raw: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    number: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    authors: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    title: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    year: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    publisher: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pages: String,
    #[serde(default, deserialize_with = "lenient::string")]
    url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    doi: String,
    #[serde(default, deserialize_with = "lenient::string")]
    isbn: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    entry_type: EntryType,
}

impl From<LiteratureRepr> for LiteratureEntry {
    fn from(value: LiteratureRepr) -> Self {
        match value {
            LiteratureRepr::Plain(raw) => LiteratureEntry::plain(raw),
            LiteratureRepr::Structured(r) => LiteratureEntry {
                raw: r.raw,
                number: r.number,
                authors: r.authors,
                title: r.title,
                year: r.year,
                publisher: r.publisher,
                pages: r.pages,
                url: r.url,
                doi: r.doi,
                isbn: r.isbn,
                entry_type: r.entry_type,
            },
        }
    }
}
