//! Query composition
//!
//! Glue between the service boundary and the scoring pipeline: a
//! category string plus capability strings become one free-text query.

/// Compose a capability query from a category and capability list
///
/// Zero capabilities yield the category alone; one capability yields
/// `"{category} with {capability}"`; several are comma-joined with the
/// final item joined by `" and "`.
#[must_use]
pub fn compose_query(software_category: &str, capabilities: &[String]) -> String {
    match capabilities {
        [] => software_category.to_string(),
        [only] => format!("{software_category} with {only}"),
        [init @ .., last] => {
            format!("{} with {} and {}", software_category, init.join(", "), last)
        }
    }
}
