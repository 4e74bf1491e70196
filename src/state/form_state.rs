//! Canonical flat form state for one commodity form

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::{split_composite, FieldValue};
use crate::schema::{Cardinality, FormSchema};

/// Mapping from field key to current value.
///
/// Once built from a schema, every schema key has an entry; a blank field
/// holds an empty value of the right shape rather than no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    values: IndexMap<String, FieldValue>,
}

impl FormState {
    /// Build the initial state for a schema: declared defaults where present,
    /// blanks everywhere else
    pub fn from_schema(schema: &FormSchema) -> Self {
        let mut values = IndexMap::with_capacity(schema.fields().len());
        for spec in schema.fields() {
            let value = match (&spec.default, spec.cardinality) {
                (Some(default), Cardinality::Single) => FieldValue::Single(default.clone()),
                (Some(default), Cardinality::Multi) => {
                    FieldValue::Multi(split_composite(default))
                }
                (None, cardinality) => FieldValue::empty(cardinality),
            };
            values.insert(spec.key.clone(), value);
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Replace one field's value
    pub fn set(&mut self, key: &str, value: FieldValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, FieldValue)> for FormState {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(entries: I) -> Self {
        Self {
            values: entries.into_iter().collect(),
        }
    }
}
