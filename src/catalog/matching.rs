//! Text matching helpers shared by the prompt criteria
//!
//! Names and titles are compared case-insensitively with whitespace runs
//! collapsed, so "Samuel  L.   Jackson" still matches "samuel l. jackson".

/// Lowercase and collapse whitespace runs to single spaces.
pub fn fold(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when `candidate` contains `name` after folding both.
pub fn name_matches(candidate: &str, name: &str) -> bool {
    let needle = fold(name);
    !needle.is_empty() && fold(candidate).contains(&needle)
}

/// Slug used in prompt ids: lowercase, whitespace runs become `-`.
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Whitespace-separated words of a title.
pub fn words(title: &str) -> Vec<&str> {
    title.split_whitespace().collect()
}

/// Alphanumeric tokens of a title, splitting on everything else.
///
/// "Se7en: The Director's Cut" yields `se7en`, `the`, `director`, `s`, `cut`.
pub fn tokens(title: &str) -> Vec<String> {
    title
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}
