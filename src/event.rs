//! Typed notifications emitted by stores and the composer.
//!
//! Subscribers (typically the rendering layer) receive events over a
//! broadcast channel instead of the engine reaching into presentation
//! internals. Payloads carry the complete current state, never a delta.

use crate::schema::Commodity;
use crate::state::{CompositeState, FormState};

/// Buffered events per subscriber before the oldest are dropped
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Notification from one commodity's field state store
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// Fired once, after the first successful picklist fetch
    Ready { commodity: Commodity },
    /// Fired on every form mutation with the full state snapshot
    StateChanged {
        commodity: Commodity,
        state: FormState,
    },
    /// The live option catalog was re-derived
    OptionsChanged { commodity: Commodity },
}

/// Notification from the wizard-level composer
#[derive(Debug, Clone)]
pub enum ComposerEvent {
    /// A child form changed; carries the full composite product state
    CompositeChanged { products: CompositeState },
}
