//! Shared tokenizer for every scoring primitive below.
//!
//! Lowercase, replace non-alphanumeric with a space, split on whitespace,
//! drop tokens shorter than 2 characters.

pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|tok| tok.len() >= 2)
        .map(str::to_string)
        .collect()
}
