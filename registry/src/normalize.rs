/// Reduces raw acronym text to its lookup key: drops every character that is not an ASCII
/// letter, digit or underscore, then uppercases the rest. `"e.t.a."` and `"ETA"` share the key `"ETA"`.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
