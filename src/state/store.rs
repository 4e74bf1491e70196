//! Per-commodity field state store

use indexmap::IndexMap;
use tokio::sync::broadcast;

use super::form_state::FormState;
use super::options::{self, OptionCatalog, PickOption};
use super::value::FieldValue;
use crate::error::{ProviderError, StoreError};
use crate::event::{StoreEvent, EVENT_CHANNEL_CAPACITY};
use crate::provider::{PicklistProvider, PicklistResponse};
use crate::schema::{Commodity, FormSchema};

/// Load lifecycle of a store.
///
/// Population is legal only in `Ready`; the one-shot `ready` notification
/// fires on the first `Loading -> Ready` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Loading,
    Ready,
}

/// Single source of truth for one commodity's form values and their option
/// metadata.
///
/// Owns the flat [`FormState`], the immutable baseline [`OptionCatalog`]
/// fetched from the provider, and the live catalog derived from both.
#[derive(Debug)]
pub struct FieldStateStore {
    commodity: Commodity,
    schema: FormSchema,
    state: FormState,
    baseline: OptionCatalog,
    live: OptionCatalog,
    lifecycle: Lifecycle,
    ready_fired: bool,
    events: broadcast::Sender<StoreEvent>,
}

impl FieldStateStore {
    /// Create a store with a schema-complete blank state and empty catalogs
    pub fn new(commodity: Commodity, schema: FormSchema) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let state = FormState::from_schema(&schema);
        Self {
            commodity,
            schema,
            state,
            baseline: OptionCatalog::new(),
            live: OptionCatalog::new(),
            lifecycle: Lifecycle::Uninitialized,
            ready_fired: false,
            events,
        }
    }

    /// Subscribe to this store's notifications
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Fetch the option catalog from the provider and build the baseline.
    ///
    /// On failure the error is logged and the store reverts to its prior
    /// lifecycle state; `ready` is withheld and the caller decides whether
    /// to re-invoke. The first success fires `ready` exactly once.
    pub async fn initialize(
        &mut self,
        provider: &dyn PicklistProvider,
    ) -> Result<(), ProviderError> {
        let prior = self.lifecycle;
        self.lifecycle = Lifecycle::Loading;
        let response = match provider.fetch_picklists(self.commodity).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("picklist fetch failed for {}: {err}", self.commodity);
                self.lifecycle = prior;
                return Err(err);
            }
        };
        self.baseline = self.baseline_from_response(response);
        self.live = options::recompute_selections(&self.baseline, &self.state);
        self.lifecycle = Lifecycle::Ready;
        if !self.ready_fired {
            self.ready_fired = true;
            let _ = self.events.send(StoreEvent::Ready {
                commodity: self.commodity,
            });
        }
        Ok(())
    }

    /// Merge externally supplied initial values into the form, field by field.
    ///
    /// Only keys present in `initial` are overwritten; `is_create` skips the
    /// merge entirely (fresh blank form). Values are coerced to each field's
    /// cardinality, so delimiter-packed composites arrive as sequences.
    /// Illegal before the store's own fetch has resolved.
    pub fn populate(
        &mut self,
        initial: IndexMap<String, FieldValue>,
        is_create: bool,
    ) -> Result<(), StoreError> {
        if self.lifecycle != Lifecycle::Ready {
            tracing::warn!(
                "rejecting populate for {}: picklist fetch has not resolved",
                self.commodity
            );
            return Err(StoreError::NotReady);
        }
        if !is_create {
            for (key, raw) in initial {
                let Some(spec) = self.schema.field(&key) else {
                    tracing::debug!("dropping unknown field {key} for {}", self.commodity);
                    continue;
                };
                let cardinality = spec.cardinality;
                self.state.set(&key, FieldValue::normalized(raw, cardinality));
            }
        }
        self.live = options::recompute_selections(&self.baseline, &self.state);
        self.publish_state();
        let _ = self.events.send(StoreEvent::OptionsChanged {
            commodity: self.commodity,
        });
        Ok(())
    }

    /// Replace one field's value and notify with the full snapshot.
    ///
    /// The value is coerced to the field's declared cardinality first.
    pub fn set_field(&mut self, key: &str, value: FieldValue) -> Result<FormState, StoreError> {
        let Some(spec) = self.schema.field(key) else {
            return Err(StoreError::UnknownField(key.to_string()));
        };
        let cardinality = spec.cardinality;
        self.state.set(key, FieldValue::normalized(value, cardinality));
        if let Some(baseline) = self.baseline.get(key) {
            let recomputed = options::recompute_field(baseline, self.state.get(key));
            if self.live.get(key) != Some(&recomputed) {
                self.live.insert(key.to_string(), recomputed);
                let _ = self.events.send(StoreEvent::OptionsChanged {
                    commodity: self.commodity,
                });
            }
        }
        self.publish_state();
        Ok(self.state.clone())
    }

    /// Whether any field required for this store's commodity is empty
    pub fn is_invalid(&self) -> bool {
        self.schema
            .fields()
            .iter()
            .filter(|spec| spec.required.applies_to(self.commodity))
            .any(|spec| self.state.get(&spec.key).map_or(true, FieldValue::is_empty))
    }

    /// Restore declared defaults and deselect every option
    pub fn reset(&mut self) {
        self.state = FormState::from_schema(&self.schema);
        self.live = options::reset_to_baseline(&self.baseline);
        self.publish_state();
        let _ = self.events.send(StoreEvent::OptionsChanged {
            commodity: self.commodity,
        });
    }

    pub fn commodity(&self) -> Commodity {
        self.commodity
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn form_state(&self) -> &FormState {
        &self.state
    }

    /// Option lists with selection flags derived from the current state
    pub fn live_catalog(&self) -> &OptionCatalog {
        &self.live
    }

    /// Option lists as originally fetched, always deselected
    pub fn baseline_catalog(&self) -> &OptionCatalog {
        &self.baseline
    }

    fn publish_state(&self) {
        let _ = self.events.send(StoreEvent::StateChanged {
            commodity: self.commodity,
            state: self.state.clone(),
        });
    }

    fn baseline_from_response(&self, mut response: PicklistResponse) -> OptionCatalog {
        let mut baseline = OptionCatalog::with_capacity(self.schema.fields().len());
        for spec in self.schema.fields() {
            let options = response
                .shift_remove(&spec.key)
                .map(|entries| {
                    entries
                        .into_iter()
                        .map(|entry| PickOption {
                            value: entry.value,
                            label: entry.label,
                            selected: false,
                        })
                        .collect()
                })
                .unwrap_or_default();
            baseline.insert(spec.key.clone(), options);
        }
        for key in response.keys() {
            tracing::debug!("provider sent options for unknown field {key}");
        }
        baseline
    }
}
