use crate::*;
use serde_json::json;

#[test]
fn category_tags_parse_leniently() {
    assert_eq!(Category::from_tag("humanitarian"), Category::Humanitarian);
    assert_eq!(Category::from_tag(" Natural-Science "), Category::NaturalScience);
    assert_eq!(Category::from_tag("technical"), Category::Technical);
    assert_eq!(Category::from_tag("astrology"), Category::Technical);
    assert_eq!(Category::from_tag(""), Category::Technical);
}

#[test]
fn category_deserializes_unknown_values_to_default() {
    let cats: Vec<Category> =
        serde_json::from_value(json!(["natural_science", "bogus", null, 3])).unwrap();
    assert_eq!(
        cats,
        vec![
            Category::NaturalScience,
            Category::Technical,
            Category::Technical,
            Category::Technical,
        ]
    );
    assert_eq!(
        serde_json::to_value(Category::Humanitarian).unwrap(),
        json!("humanitarian")
    );
}

#[test]
fn classify_scores_keyword_stems() {
    assert_eq!(
        classify("Основы программирования на Python", "", ""),
        Category::Technical
    );
    assert_eq!(
        classify("История и философия науки", "", ""),
        Category::Humanitarian
    );
    assert_eq!(
        classify("Общая биология", "Клеточная биология и генетика", ""),
        Category::NaturalScience
    );
}

#[test]
fn classify_ties_resolve_to_technical() {
    assert_eq!(classify("", "", ""), Category::Technical);
    assert_eq!(classify("Физика", "Философия", ""), Category::Technical);
}
