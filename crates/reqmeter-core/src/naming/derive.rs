//! Timer and counter name derivation.

use super::rules::GroupingRules;

/// Group used when the request path is empty.
pub const ROOT_GROUP: &str = "root";
/// Counter bumped instead of a status class when the code is outside 100..=599.
pub const INVALID_STATUS_COUNTER: &str = "invalid-responses";
/// Counter bumped when a request is dropped before it produced an outcome.
pub const CANCELLED_COUNTER: &str = "cancelled-requests";

/// Build the timer name for a request.
///
/// The default group is the path with every `/` turned into `.` (a leading
/// separator stays as a leading `.`), or `root` for an empty path. The first
/// grouping rule whose pattern matches the whole path replaces it.
pub fn derive_timer_name(path: &str, method: &str, rules: &GroupingRules) -> String {
    let group = match rules.first_match(path) {
        Some(name) => name.to_string(),
        None if path.is_empty() => ROOT_GROUP.to_string(),
        None => path.replace('/', "."),
    };
    format!("{group}.{}-requests", method.to_lowercase())
}

/// Build the status-class counter name (`404` -> `4xx-responses`).
///
/// Codes outside 100..=599 map to [`INVALID_STATUS_COUNTER`].
pub fn derive_counter_name(status_code: u16) -> String {
    if !(100..=599).contains(&status_code) {
        return INVALID_STATUS_COUNTER.to_string();
    }
    format!("{}xx-responses", status_code / 100)
}
