//! Wizard-level aggregation of per-commodity form stores

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio::sync::broadcast;

use super::form_state::FormState;
use super::store::{FieldStateStore, Lifecycle};
use super::value::FieldValue;
use crate::error::{ProviderError, StoreError};
use crate::event::{ComposerEvent, EVENT_CHANNEL_CAPACITY};
use crate::provider::PicklistProvider;
use crate::schema::{Commodity, CommodityScope, FormSchema};

/// Per-commodity initial values supplied by an external context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSeeds {
    #[serde(rename = "EE", default, skip_serializing_if = "Option::is_none")]
    pub power: Option<IndexMap<String, FieldValue>>,
    #[serde(rename = "GAS", default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<IndexMap<String, FieldValue>>,
}

impl ProductSeeds {
    pub fn seed(&self, commodity: Commodity) -> Option<&IndexMap<String, FieldValue>> {
        match commodity {
            Commodity::Power => self.power.as_ref(),
            Commodity::Gas => self.gas.as_ref(),
        }
    }
}

/// Externally supplied context for one wizard run.
///
/// A context carrying `products` switches the wizard into edit mode; a
/// missing commodity entry is tolerated and leaves that form at its defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardContext {
    pub commodity: CommodityScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<ProductSeeds>,
}

/// Last reported form state per commodity, as handed to the external consumer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeState {
    #[serde(rename = "EE", default, skip_serializing_if = "Option::is_none")]
    pub power: Option<FormState>,
    #[serde(rename = "GAS", default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<FormState>,
}

impl CompositeState {
    pub fn get(&self, commodity: Commodity) -> Option<&FormState> {
        match commodity {
            Commodity::Power => self.power.as_ref(),
            Commodity::Gas => self.gas.as_ref(),
        }
    }

    fn set(&mut self, commodity: Commodity, state: FormState) {
        match commodity {
            Commodity::Power => self.power = Some(state),
            Commodity::Gas => self.gas = Some(state),
        }
    }
}

/// Aggregates one [`FieldStateStore`] per active commodity into a composite
/// wizard payload.
///
/// All composite mutation funnels through this type: children report full
/// snapshots, the composer overwrites its entry and republishes the whole
/// composite. The one-time context push into a child happens on that child's
/// ready edge and never again.
#[derive(Debug)]
pub struct FormComposer {
    scope: CommodityScope,
    power: Option<FieldStateStore>,
    gas: Option<FieldStateStore>,
    composite: CompositeState,
    context: Option<WizardContext>,
    is_edit: bool,
    seeded: HashSet<Commodity>,
    events: broadcast::Sender<ComposerEvent>,
}

impl FormComposer {
    /// Create the composer and a store for each commodity active in `scope`
    pub fn new(scope: CommodityScope, schema: FormSchema) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let power = scope
            .wants_power()
            .then(|| FieldStateStore::new(Commodity::Power, schema.clone()));
        let gas = scope
            .wants_gas()
            .then(|| FieldStateStore::new(Commodity::Gas, schema));
        Self {
            scope,
            power,
            gas,
            composite: CompositeState::default(),
            context: None,
            is_edit: false,
            seeded: HashSet::new(),
            events,
        }
    }

    /// Subscribe to composite notifications
    pub fn subscribe(&self) -> broadcast::Receiver<ComposerEvent> {
        self.events.subscribe()
    }

    /// Capture the external context. One-time: later calls are ignored.
    pub fn set_context(&mut self, context: WizardContext) {
        if self.context.is_some() {
            tracing::debug!("wizard context already captured, ignoring");
            return;
        }
        if context.commodity != self.scope {
            tracing::debug!(
                "context scope {:?} differs from wizard scope {:?}",
                context.commodity,
                self.scope
            );
        }
        self.is_edit = context.products.is_some();
        self.context = Some(context);
    }

    /// Drive each active child's picklist fetch, pushing context data into a
    /// child as soon as that child becomes ready.
    ///
    /// A failing child is logged and reported; surviving children stay
    /// usable. The first error (if any) is returned after every child has
    /// been attempted.
    pub async fn initialize(
        &mut self,
        provider: &dyn PicklistProvider,
    ) -> Result<(), ProviderError> {
        let mut first_error = None;
        for &commodity in self.scope.commodities() {
            let result = {
                let Some(store) = self.store_mut(commodity) else {
                    continue;
                };
                store.initialize(provider).await
            };
            match result {
                Ok(()) => self.on_child_ready(commodity),
                Err(err) => {
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }
        match first_error {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// One-time reaction to a child's ready signal: push the context's
    /// product data for that commodity (edit mode only) and record the
    /// child's snapshot in the composite. Re-entrant signals are ignored.
    pub fn on_child_ready(&mut self, commodity: Commodity) {
        if self.seeded.contains(&commodity) {
            return;
        }
        let seed = self
            .context
            .as_ref()
            .and_then(|context| context.products.as_ref())
            .and_then(|products| products.seed(commodity))
            .cloned();
        let is_edit = self.is_edit;
        let snapshot = {
            let Some(store) = self.store_mut(commodity) else {
                return;
            };
            if store.lifecycle() != Lifecycle::Ready {
                return;
            }
            if is_edit {
                if let Some(seed) = seed {
                    if let Err(err) = store.populate(seed, false) {
                        tracing::warn!("seeding {commodity} form failed: {err}");
                    }
                }
            }
            store.form_state().clone()
        };
        self.seeded.insert(commodity);
        self.composite.set(commodity, snapshot);
        self.publish_composite();
    }

    /// Overwrite one commodity's composite entry with a child-reported
    /// snapshot and notify the external consumer
    pub fn on_child_state_changed(&mut self, commodity: Commodity, state: FormState) {
        self.composite.set(commodity, state);
        self.publish_composite();
    }

    /// Route a field edit to the matching child store and update the composite
    pub fn set_field(
        &mut self,
        commodity: Commodity,
        key: &str,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        let snapshot = {
            let Some(store) = self.store_mut(commodity) else {
                return Err(StoreError::InactiveCommodity(commodity));
            };
            store.set_field(key, value)?
        };
        self.on_child_state_changed(commodity, snapshot);
        Ok(())
    }

    /// True if any active child form is invalid (or no child is active)
    pub fn is_invalid(&self) -> bool {
        let mut any_active = false;
        for &commodity in self.scope.commodities() {
            let Some(store) = self.store(commodity) else {
                continue;
            };
            any_active = true;
            if store.is_invalid() {
                return true;
            }
        }
        !any_active
    }

    /// Reset every active child to its defaults and republish the composite
    pub fn reset(&mut self) {
        for &commodity in self.scope.commodities() {
            let snapshot = {
                let Some(store) = self.store_mut(commodity) else {
                    continue;
                };
                store.reset();
                store.form_state().clone()
            };
            self.composite.set(commodity, snapshot);
        }
        self.publish_composite();
    }

    pub fn scope(&self) -> CommodityScope {
        self.scope
    }

    pub fn is_edit(&self) -> bool {
        self.is_edit
    }

    pub fn composite(&self) -> &CompositeState {
        &self.composite
    }

    pub fn store(&self, commodity: Commodity) -> Option<&FieldStateStore> {
        match commodity {
            Commodity::Power => self.power.as_ref(),
            Commodity::Gas => self.gas.as_ref(),
        }
    }

    pub fn store_mut(&mut self, commodity: Commodity) -> Option<&mut FieldStateStore> {
        match commodity {
            Commodity::Power => self.power.as_mut(),
            Commodity::Gas => self.gas.as_mut(),
        }
    }

    fn publish_composite(&self) {
        let _ = self.events.send(ComposerEvent::CompositeChanged {
            products: self.composite.clone(),
        });
    }
}
