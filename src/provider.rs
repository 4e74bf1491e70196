//! Trait abstraction for the external picklist provider to enable mocking in tests

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::schema::Commodity;

/// One selectable choice as supplied by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistEntry {
    pub value: String,
    pub label: String,
}

impl PicklistEntry {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Full option payload for one commodity's field set, keyed by field
pub type PicklistResponse = IndexMap<String, Vec<PicklistEntry>>;

/// Asynchronous source of picklist metadata for one commodity's field set.
///
/// The engine treats the transport as opaque; implementations wrap whatever
/// remote call supplies the option catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PicklistProvider: Send + Sync {
    /// Fetch the option catalog for one commodity's field set
    async fn fetch_picklists(&self, commodity: Commodity)
        -> Result<PicklistResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserializes_from_flat_payload() {
        let raw = r#"{
            "color": [
                {"value": "R", "label": "Red"},
                {"value": "B", "label": "Blue"}
            ]
        }"#;
        let response: PicklistResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response["color"].len(), 2);
        assert_eq!(response["color"][0], PicklistEntry::new("R", "Red"));
    }

    #[tokio::test]
    async fn test_mock_provider_round_trip() {
        let mut provider = MockPicklistProvider::new();
        provider.expect_fetch_picklists().returning(|_| {
            let mut response = PicklistResponse::new();
            response.insert("color".to_string(), vec![PicklistEntry::new("R", "Red")]);
            Ok(response)
        });
        let response = provider.fetch_picklists(Commodity::Power).await.unwrap();
        assert_eq!(response["color"][0].value, "R");
    }
}
