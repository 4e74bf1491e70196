//! Error types for the form-state engine

use crate::schema::Commodity;
use thiserror::Error;

/// Failure reported by the external picklist provider.
///
/// The engine never retries on its own; a failed fetch leaves the store in
/// its prior lifecycle state and the caller decides whether to re-invoke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("picklist fetch failed: {reason}")]
pub struct ProviderError {
    pub reason: String,
}

impl ProviderError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Misuse of a form-state store surfaced to the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store's own picklist fetch has not resolved yet; population
    /// would merge into a form whose option catalog does not exist
    #[error("store has not completed its picklist fetch")]
    NotReady,
    #[error("unknown field key `{0}`")]
    UnknownField(String),
    #[error("commodity {0} is not active in this wizard")]
    InactiveCommodity(Commodity),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::new("apex timeout");
        assert_eq!(err.to_string(), "picklist fetch failed: apex timeout");
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::UnknownField("color".to_string()).to_string(),
            "unknown field key `color`"
        );
        assert_eq!(
            StoreError::InactiveCommodity(Commodity::Gas).to_string(),
            "commodity GAS is not active in this wizard"
        );
    }
}
