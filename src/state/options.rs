//! Selection-flag derivation between baseline and live option catalogs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::form_state::FormState;
use super::value::FieldValue;

/// One selectable choice for a field.
///
/// `selected` is derived from form state, never authoritative on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub selected: bool,
}

/// Ordered option lists per field key.
///
/// Two copies exist per store: a baseline (all deselected, never mutated
/// after the fetch) and a live view derived from the current form state.
pub type OptionCatalog = IndexMap<String, Vec<PickOption>>;

/// Derive the live catalog: an option is selected iff its value is a member
/// of the field's current value treated as a set. The baseline is left
/// untouched; option order and labels carry over unchanged.
pub fn recompute_selections(baseline: &OptionCatalog, state: &FormState) -> OptionCatalog {
    baseline
        .iter()
        .map(|(key, options)| (key.clone(), recompute_field(options, state.get(key))))
        .collect()
}

/// Single-field variant of [`recompute_selections`]
pub fn recompute_field(options: &[PickOption], value: Option<&FieldValue>) -> Vec<PickOption> {
    let members = value.map(FieldValue::members).unwrap_or_default();
    options
        .iter()
        .map(|option| PickOption {
            selected: members.contains(&option.value.as_str()),
            ..option.clone()
        })
        .collect()
}

/// Deep copy of the baseline with every selection flag cleared
pub fn reset_to_baseline(baseline: &OptionCatalog) -> OptionCatalog {
    baseline
        .iter()
        .map(|(key, options)| {
            let cleared = options
                .iter()
                .map(|option| PickOption {
                    selected: false,
                    ..option.clone()
                })
                .collect();
            (key.clone(), cleared)
        })
        .collect()
}
