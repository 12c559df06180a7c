//! Field-level validation failures.

use std::collections::BTreeMap;

use serde::Serialize;

/// Mapping from wire field name to a short violation tag such as
/// `required` or `min: 3`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Record a violation. The key is normalised to a lower-case first letter.
    pub fn insert(&mut self, field: &str, tag: impl Into<String>) {
        self.0.insert(lower_first(field), tag.into());
    }

    /// Get the tag recorded for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of fields with violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no violation has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn lower_first(field: &str) -> String {
    let mut chars = field.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_lowers_first_letter() {
        let mut fields = FieldErrors::default();
        fields.insert("UserID", "uuid");
        fields.insert("text", "required");

        assert_eq!(fields.get("userID"), Some("uuid"));
        assert_eq!(fields.get("text"), Some("required"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_lower_first_edge_cases() {
        assert_eq!(lower_first(""), "");
        assert_eq!(lower_first("A"), "a");
        assert_eq!(lower_first("ÉtéField"), "étéField");
    }
}
