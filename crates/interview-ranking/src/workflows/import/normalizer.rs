/// Strips invisible export artifacts and collapses runs of whitespace.
pub(crate) fn clean_identifier(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive key used for role lookups.
pub(crate) fn normalize_role(value: &str) -> String {
    clean_identifier(value).to_ascii_lowercase()
}
