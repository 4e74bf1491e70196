//! Mapping of externally fetched record payloads onto schema field keys

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::schema::FormSchema;
use crate::state::FieldValue;

/// Translation table from external record field names to schema keys.
///
/// Edit mode hydrates the form from a record fetched elsewhere, keyed by the
/// backing system's field names. Values come in as raw strings; multi-value
/// selections arrive packed with the composite delimiter and are split while
/// translating.
#[derive(Debug, Clone)]
pub struct RecordFieldMap {
    entries: IndexMap<String, String>,
}

impl RecordFieldMap {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(external, key)| (external.to_string(), key.to_string()))
                .collect(),
        }
    }

    /// Stock mapping for the supply-contract record layout
    pub fn contract() -> Self {
        Self::new([
            ("BillDeliveryMethod__c", "bill_delivery_method"),
            ("BillingFrequency__c", "billing_frequency"),
            ("UseType__c", "use_type"),
            ("Residence__c", "residence"),
            ("PowerCapacity__c", "power_capacity"),
            ("PaymentMethod__c", "payment_method"),
            ("TouNumber__c", "tou_number"),
            ("Consumption__c", "consumption"),
            ("CustomerAge__c", "customer_age"),
            ("Counter2G__c", "counter_2g"),
            ("DurationWithPreviousSupplier__c", "duration_with_previous_supplier"),
            ("SourceMarket__c", "source_market"),
            ("ContractDuration__c", "contract_duration"),
            ("PriceType__c", "price_type"),
            ("PreviousSupplier__c", "previous_supplier"),
        ])
    }

    /// Translate a flat record payload into schema-keyed initial values.
    ///
    /// Null values, external names without a mapping and mapped keys missing
    /// from the schema are all skipped; the result feeds straight into
    /// store population.
    pub fn translate(
        &self,
        payload: &HashMap<String, Option<String>>,
        schema: &FormSchema,
    ) -> IndexMap<String, FieldValue> {
        let mut values = IndexMap::new();
        for (external, key) in &self.entries {
            let Some(Some(raw)) = payload.get(external) else {
                continue;
            };
            let Some(spec) = schema.field(key) else {
                tracing::debug!("record field {external} maps to unknown key {key}");
                continue;
            };
            let value =
                FieldValue::normalized(FieldValue::Single(raw.clone()), spec.cardinality);
            values.insert(key.clone(), value);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload(entries: &[(&str, Option<&str>)]) -> HashMap<String, Option<String>> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_translate_splits_packed_multi_values() {
        let payload = payload(&[("PowerCapacity__c", Some("3;4.5"))]);
        let values = RecordFieldMap::contract().translate(&payload, &FormSchema::contract());
        assert_eq!(
            values.get("power_capacity"),
            Some(&FieldValue::Multi(vec!["3".to_string(), "4.5".to_string()]))
        );
    }

    #[test]
    fn test_translate_keeps_scalars_for_single_fields() {
        let payload = payload(&[("UseType__c", Some("Domestico"))]);
        let values = RecordFieldMap::contract().translate(&payload, &FormSchema::contract());
        assert_eq!(
            values.get("use_type"),
            Some(&FieldValue::Single("Domestico".to_string()))
        );
    }

    #[test]
    fn test_translate_skips_nulls_and_unmapped_names() {
        let payload = payload(&[
            ("UseType__c", None),
            ("Mystery__c", Some("x")),
        ]);
        let values = RecordFieldMap::contract().translate(&payload, &FormSchema::contract());
        assert!(values.is_empty());
    }

    #[test]
    fn test_translate_covers_every_mapped_field() {
        let payload = payload(&[
            ("BillDeliveryMethod__c", Some("Mail")),
            ("BillingFrequency__c", Some("Monthly;Yearly")),
            ("Consumption__c", Some("Low")),
            ("PriceType__c", Some("Fixed")),
        ]);
        let values = RecordFieldMap::contract().translate(&payload, &FormSchema::contract());
        assert_eq!(values.len(), 4);
        assert_eq!(
            values.get("billing_frequency"),
            Some(&FieldValue::Multi(vec![
                "Monthly".to_string(),
                "Yearly".to_string()
            ]))
        );
        assert_eq!(
            values.get("price_type"),
            Some(&FieldValue::Single("Fixed".to_string()))
        );
    }
}
