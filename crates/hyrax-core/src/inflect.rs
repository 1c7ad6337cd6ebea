//! English singularization for relationship names.
//!
//! Covers the plural forms reflection names actually use (`members`,
//! `file_sets`, `member_of_collections`, `child_works`, `categories`).
//! Only the last underscore-separated segment is inflected.

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("series", "series"),
    ("species", "species"),
    ("news", "news"),
];

/// Singularize the last segment of a snake_case name.
#[must_use]
pub fn singularize(name: &str) -> String {
    let (head, last) = match name.rfind('_') {
        Some(idx) => name.split_at(idx + 1),
        None => ("", name),
    };
    format!("{head}{}", singularize_word(last))
}

fn singularize_word(word: &str) -> String {
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return (*singular).to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "xes", "ches", "shes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}
