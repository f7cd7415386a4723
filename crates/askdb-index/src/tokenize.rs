/// Lowercase `text` and split it into index terms.
///
/// Terms are maximal alphanumeric runs; everything else is a boundary.
/// Single-character tokens are dropped. No stop-word removal: stop lists are
/// language-specific and the corpus is not.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 1)
        .map(str::to_string)
        .collect()
}
