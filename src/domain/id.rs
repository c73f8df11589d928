use uuid::Uuid;

/// Generates a fresh collision-resistant identifier (UUID v4)
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Lowercases and replaces each whitespace run with a single dash
///
/// Used for board slugs and for matching a task's column reference
/// against column ids that were typed with spaces.
pub fn slugify(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
