//! Links sections to the software tools they most plausibly use.

use crate::model::Section;
use regex::Regex;
use rustc_hash::FxHashSet;

const TOOL_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "python",
        &[
            "python",
            "питон",
            "django",
            "flask",
            "numpy",
            "pandas",
            "matplotlib",
            "scipy",
            "jupyter",
            "notebook",
        ],
    ),
    ("java", &["java", "jdk", "jvm", "spring", "maven", "gradle"]),
    ("c++", &["c++", "cpp", "stl", "шаблон", "template"]),
    (
        "javascript",
        &["javascript", "js", "node", "react", "angular", "vue", "typescript"],
    ),
    ("matlab", &["matlab", "матлаб", "simulink", "моделирован"]),
    (
        "visual studio",
        &["visual studio", "vs code", "vscode", "отладка", "debug", "ide"],
    ),
    (
        "mysql",
        &["mysql", "sql", "база данных", "бд", "запрос", "таблиц"],
    ),
    ("postgresql", &["postgresql", "postgres"]),
    ("git", &["git", "github", "gitlab", "версион", "репозитор"]),
    ("docker", &["docker", "контейнер", "виртуализац"]),
    (
        "linux",
        &["linux", "ubuntu", "терминал", "bash", "командн строк"],
    ),
    ("latex", &["latex", "tex", "набор текст", "верстк"]),
    (
        "microsoft office",
        &["office", "word", "excel", "powerpoint"],
    ),
];

const MIN_KEYWORD_CHARS: usize = 3;

fn token_split_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s,;/\\()\-]+").expect("valid regex"))
}

/// Keywords that indicate a section uses `software`.
pub fn software_keywords(software: &str) -> Vec<String> {
    let lower = software.trim().to_lowercase();
    let mut keywords: Vec<String> = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut add = |kw: &str, keywords: &mut Vec<String>| {
        if seen.insert(kw.to_string()) {
            keywords.push(kw.to_string());
        }
    };

    for (tool, kws) in TOOL_KEYWORDS {
        let related = lower.contains(tool)
            || (!lower.is_empty() && tool.contains(lower.as_str()))
            || kws.iter().any(|kw| lower.contains(kw));
        if related {
            for kw in *kws {
                add(kw, &mut keywords);
            }
        }
    }
    add(&lower, &mut keywords);
    for part in token_split_regex().split(&lower) {
        if part.chars().count() > 2 {
            add(part, &mut keywords);
        }
    }
    keywords
}

/// Rewrites every section's `linked_software` from its name and content.
///
/// A section links a tool when any of the tool's keywords (three characters or longer) occurs in
/// the section text. Tools that no section mentions are spread round-robin over the sections so
/// every tool stays attached to some part of the syllabus. Does nothing when either list is empty.
pub fn link_software(sections: &mut [Section], software: &[String]) {
    if sections.is_empty() || software.is_empty() {
        return;
    }

    let keywords: Vec<Vec<String>> = software.iter().map(|s| software_keywords(s)).collect();

    for section in sections.iter_mut() {
        let text = format!("{} {}", section.name, section.content).to_lowercase();
        section.linked_software = software
            .iter()
            .zip(&keywords)
            .filter(|(_, kws)| {
                kws.iter()
                    .filter(|kw| kw.chars().count() >= MIN_KEYWORD_CHARS)
                    .any(|kw| text.contains(kw.as_str()))
            })
            .map(|(sw, _)| sw.clone())
            .fold(Vec::new(), |mut acc, sw| {
                if !acc.contains(&sw) {
                    acc.push(sw);
                }
                acc
            });
    }

    let matched: FxHashSet<&str> = sections
        .iter()
        .flat_map(|s| s.linked_software.iter().map(String::as_str))
        .collect();
    let unmatched: Vec<String> = software
        .iter()
        .filter(|sw| !matched.contains(sw.as_str()))
        .cloned()
        .collect();

    let n = sections.len();
    for (k, sw) in unmatched.into_iter().enumerate() {
        let target = &mut sections[k % n].linked_software;
        if !target.contains(&sw) {
            target.push(sw);
        }
    }
}
