//! contract-form - headless form-state engine for supply contract wizards
//!
//! Keeps one flat form state per commodity (electricity/gas) in sync with
//! the multi-select option catalogs behind it, aggregates the per-commodity
//! forms into a composite wizard payload, and answers validity queries.
//! Option metadata comes from an opaque asynchronous provider; rendering
//! subscribes to typed notifications.

pub mod error;
pub mod event;
pub mod provider;
pub mod record;
pub mod schema;
pub mod state;

pub use error::{ProviderError, StoreError};
pub use event::{ComposerEvent, StoreEvent};
pub use provider::{PicklistEntry, PicklistProvider, PicklistResponse};
pub use record::RecordFieldMap;
pub use schema::{Cardinality, Commodity, CommodityScope, FieldSpec, FormSchema, Requirement};
pub use state::{
    CompositeState, FieldStateStore, FieldValue, FormComposer, FormState, Lifecycle,
    OptionCatalog, PickOption, ProductSeeds, WizardContext,
};
