use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Broad subject area of a discipline. Drives the color family of everything it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Technical,
    Humanitarian,
    NaturalScience,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Technical,
        Category::Humanitarian,
        Category::NaturalScience,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::Humanitarian => "humanitarian",
            Category::NaturalScience => "natural_science",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Technical => "Technical",
            Category::Humanitarian => "Humanities",
            Category::NaturalScience => "Natural science",
        }
    }

    /// Parses a category tag. Unknown or empty tags fall back to [`Category::Technical`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "humanitarian" | "humanities" => Category::Humanitarian,
            "natural_science" | "natural" | "natural_sciences" => Category::NaturalScience,
            _ => Category::Technical,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Category::from_tag).unwrap_or_default())
    }
}

const TECHNICAL_KEYWORDS: &[&str] = &[
    "программирование",
    "алгоритм",
    "информатик",
    "математик",
    "вычислит",
    "компьютер",
    "сеть",
    "базы данных",
    "разработк",
    "инженер",
    "технолог",
    "механик",
    "электрон",
    "автоматиз",
    "робот",
    "искусственн",
    "машинн",
    "нейрон",
    "кибернетик",
    "системн",
    "архитектур",
    "микропроцессор",
    "телекоммуникац",
    "криптограф",
    "блокчейн",
    "devops",
    "sql",
    "python",
    "java",
    "c++",
    "javascript",
    "web",
    "api",
    "frontend",
    "backend",
    "физик",
    "оптик",
    "квантов",
    "статистик",
    "теория вероятност",
    "дискретн",
    "линейн алгебр",
    "дифференциальн",
    "численн метод",
];

const HUMANITARIAN_KEYWORDS: &[&str] = &[
    "философ",
    "истори",
    "литератур",
    "язык",
    "лингвистик",
    "культур",
    "социолог",
    "психолог",
    "педагогик",
    "право",
    "юриспруденц",
    "экономик",
    "менеджмент",
    "маркетинг",
    "управлен",
    "политолог",
    "журналист",
    "филолог",
    "иностранн",
    "английск",
    "немецк",
    "французск",
    "перевод",
    "коммуникац",
    "этик",
    "эстетик",
    "религиоведен",
    "археолог",
    "антрополог",
    "документоведен",
];

const NATURAL_KEYWORDS: &[&str] = &[
    "биолог",
    "хими",
    "эколог",
    "геолог",
    "географ",
    "астроном",
    "ботаник",
    "зоолог",
    "генетик",
    "биохим",
    "микробиолог",
    "анатоми",
    "физиолог",
    "палеонтолог",
    "океанолог",
    "метеоролог",
    "почвоведен",
    "биофизик",
    "молекулярн",
    "клеточн",
    "органическ",
    "неорганическ",
    "аналитическ хим",
    "биотехнолог",
];

fn score(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| text.contains(*kw)).count()
}

/// Guesses a discipline's category from its name, description and goals.
///
/// Each category scores one point per keyword stem found in the lower-cased text. Ties resolve
/// toward technical, then humanitarian, so an empty text is technical.
pub fn classify(name: &str, description: &str, goals: &str) -> Category {
    let text = format!("{name} {description} {goals}").to_lowercase();
    let tech = score(&text, TECHNICAL_KEYWORDS);
    let hum = score(&text, HUMANITARIAN_KEYWORDS);
    let nat = score(&text, NATURAL_KEYWORDS);
    if tech >= hum && tech >= nat {
        Category::Technical
    } else if hum >= nat {
        Category::Humanitarian
    } else {
        Category::NaturalScience
    }
}
