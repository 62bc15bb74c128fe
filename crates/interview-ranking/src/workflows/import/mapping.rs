use super::normalizer::normalize_role;
use std::collections::HashMap;
use std::sync::OnceLock;

static ROLE_EXCLUSIONS: OnceLock<HashMap<String, bool>> = OnceLock::new();

/// Default exclusion flag for a rater role, `None` when the role is unknown.
pub(crate) fn exclusion_for_role(role: &str) -> Option<bool> {
    let normalized = normalize_role(role);
    if normalized.is_empty() {
        return None;
    }
    if normalized.starts_with("pgy") {
        return Some(true);
    }
    role_exclusions().get(&normalized).copied()
}

fn role_exclusions() -> &'static HashMap<String, bool> {
    ROLE_EXCLUSIONS.get_or_init(|| {
        const ROLE_TO_EXCLUDE: &[(&str, bool)] = &[
            ("Resident", true),
            ("Resident Interviewer", true),
            ("Chief Resident", true),
            ("Faculty", false),
            ("Faculty Interviewer", false),
            ("Program Director", false),
            ("Associate Program Director", false),
            ("APD", false),
            ("PD", false),
            ("Coordinator", false),
            ("Program Coordinator", false),
        ];

        ROLE_TO_EXCLUDE
            .iter()
            .map(|(role, exclude)| (normalize_role(role), *exclude))
            .collect()
    })
}

/// Parses an explicit `Exclude` cell.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match normalize_role(value).as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
