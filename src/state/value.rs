//! Field value objects and boundary normalization

use serde::{Deserialize, Serialize};

use crate::schema::Cardinality;

/// Delimiter used by external record payloads to pack multi-value selections
/// into one string
pub const MULTI_VALUE_DELIMITER: char = ';';

/// Current value of one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    /// Ordered set of selected option tokens
    Multi(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Single(String::new())
    }
}

impl FieldValue {
    /// Blank value of the right shape for a field's cardinality
    pub fn empty(cardinality: Cardinality) -> Self {
        match cardinality {
            Cardinality::Single => FieldValue::Single(String::new()),
            Cardinality::Multi => FieldValue::Multi(Vec::new()),
        }
    }

    /// Coerce a raw payload into the shape declared by the field.
    ///
    /// A scalar supplied for a multi field becomes a one-element sequence,
    /// or is split on [`MULTI_VALUE_DELIMITER`] when it packs several tokens.
    /// A sequence supplied for a single field keeps its first element.
    pub fn normalized(raw: FieldValue, cardinality: Cardinality) -> FieldValue {
        match (cardinality, raw) {
            (Cardinality::Single, FieldValue::Single(value)) => FieldValue::Single(value),
            (Cardinality::Single, FieldValue::Multi(values)) => {
                FieldValue::Single(values.into_iter().next().unwrap_or_default())
            }
            (Cardinality::Multi, FieldValue::Single(value)) => {
                FieldValue::Multi(split_composite(&value))
            }
            (Cardinality::Multi, FieldValue::Multi(values)) => FieldValue::Multi(values),
        }
    }

    /// Value treated as a set of selected tokens; a scalar is a one-element
    /// set, blank values are the empty set
    pub fn members(&self) -> Vec<&str> {
        match self {
            FieldValue::Single(value) if value.trim().is_empty() => Vec::new(),
            FieldValue::Single(value) => vec![value.as_str()],
            FieldValue::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Empty means: blank or whitespace-only string, or an empty sequence
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Single(value) => value.trim().is_empty(),
            FieldValue::Multi(values) => values.is_empty(),
        }
    }
}

/// Split a delimiter-packed composite string into its tokens
pub fn split_composite(raw: &str) -> Vec<String> {
    raw.split(MULTI_VALUE_DELIMITER)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_matches_cardinality() {
        assert_eq!(
            FieldValue::empty(Cardinality::Single),
            FieldValue::Single(String::new())
        );
        assert_eq!(
            FieldValue::empty(Cardinality::Multi),
            FieldValue::Multi(Vec::new())
        );
    }

    #[test]
    fn test_normalized_splits_composite_for_multi() {
        let value = FieldValue::normalized(
            FieldValue::Single("R;B".to_string()),
            Cardinality::Multi,
        );
        assert_eq!(
            value,
            FieldValue::Multi(vec!["R".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn test_normalized_wraps_plain_scalar_for_multi() {
        let value =
            FieldValue::normalized(FieldValue::Single("R".to_string()), Cardinality::Multi);
        assert_eq!(value, FieldValue::Multi(vec!["R".to_string()]));
    }

    #[test]
    fn test_normalized_blank_scalar_for_multi_is_empty_set() {
        let value =
            FieldValue::normalized(FieldValue::Single("  ".to_string()), Cardinality::Multi);
        assert_eq!(value, FieldValue::Multi(Vec::new()));
    }

    #[test]
    fn test_normalized_sequence_for_single_keeps_head() {
        let value = FieldValue::normalized(
            FieldValue::Multi(vec!["first".to_string(), "second".to_string()]),
            Cardinality::Single,
        );
        assert_eq!(value, FieldValue::Single("first".to_string()));
    }

    #[test]
    fn test_normalized_empty_sequence_for_single_is_blank() {
        let value = FieldValue::normalized(FieldValue::Multi(Vec::new()), Cardinality::Single);
        assert_eq!(value, FieldValue::Single(String::new()));
    }

    #[test]
    fn test_members_scalar_is_one_element_set() {
        let value = FieldValue::Single("R".to_string());
        assert_eq!(value.members(), vec!["R"]);
    }

    #[test]
    fn test_members_blank_scalar_is_empty_set() {
        let value = FieldValue::Single("   ".to_string());
        assert!(value.members().is_empty());
    }

    #[test]
    fn test_is_empty_on_whitespace_string() {
        assert!(FieldValue::Single(" \t".to_string()).is_empty());
        assert!(!FieldValue::Single("x".to_string()).is_empty());
    }

    #[test]
    fn test_is_empty_on_sequences() {
        assert!(FieldValue::Multi(Vec::new()).is_empty());
        assert!(!FieldValue::Multi(vec!["x".to_string()]).is_empty());
    }

    #[test]
    fn test_split_composite_drops_blank_parts() {
        assert_eq!(split_composite("R; ;B;"), vec!["R", "B"]);
    }

    #[test]
    fn test_serde_scalar_and_sequence_shapes() {
        let scalar: FieldValue = serde_json::from_str("\"Domestico\"").unwrap();
        assert_eq!(scalar, FieldValue::Single("Domestico".to_string()));
        let sequence: FieldValue = serde_json::from_str(r#"["R", "B"]"#).unwrap();
        assert_eq!(
            sequence,
            FieldValue::Multi(vec!["R".to_string(), "B".to_string()])
        );
        assert_eq!(serde_json::to_string(&scalar).unwrap(), "\"Domestico\"");
    }
}
