//! Free-text strain list parsing for bulk export.

/// Parse a whitespace/newline-delimited strain id list, preserving first
/// appearance order and dropping duplicates. Empty or blank input yields an
/// empty list; callers disable the export action rather than erroring.
pub fn strain_list(text: &str) -> Vec<String> {
    let mut strains = Vec::new();
    for token in text.split_whitespace() {
        if !strains.iter().any(|s| s == token) {
            strains.push(token.to_string());
        }
    }
    strains
}
