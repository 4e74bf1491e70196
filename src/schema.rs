//! Declarative field schema driving store, synchronization and validation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category of one supply contract line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Commodity {
    /// Electricity ("EE")
    #[serde(rename = "EE")]
    Power,
    /// Gas ("GAS")
    #[serde(rename = "GAS")]
    Gas,
}

impl Commodity {
    /// Wire code used by external contexts and payloads
    pub fn code(self) -> &'static str {
        match self {
            Commodity::Power => "EE",
            Commodity::Gas => "GAS",
        }
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Wizard-level commodity selection deciding which per-commodity forms are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommodityScope {
    #[serde(rename = "EE")]
    Power,
    #[serde(rename = "GAS")]
    Gas,
    #[serde(rename = "DUAL")]
    Dual,
}

impl CommodityScope {
    /// Whether an electricity form is part of this wizard
    pub fn wants_power(self) -> bool {
        !matches!(self, CommodityScope::Gas)
    }

    /// Whether a gas form is part of this wizard
    pub fn wants_gas(self) -> bool {
        !matches!(self, CommodityScope::Power)
    }

    /// Display commodity for the wizard header; a dual contract leads with power
    pub fn primary(self) -> Commodity {
        match self {
            CommodityScope::Gas => Commodity::Gas,
            CommodityScope::Power | CommodityScope::Dual => Commodity::Power,
        }
    }

    /// Active commodities in rendering order
    pub fn commodities(self) -> &'static [Commodity] {
        match self {
            CommodityScope::Power => &[Commodity::Power],
            CommodityScope::Gas => &[Commodity::Gas],
            CommodityScope::Dual => &[Commodity::Power, Commodity::Gas],
        }
    }
}

/// Whether a field holds one value or a set of selected tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Single,
    Multi,
}

/// When a field must be non-empty for the form to validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    Always,
    #[default]
    Never,
    /// Required only when the owning form is for the given commodity
    OnlyFor(Commodity),
}

impl Requirement {
    /// Whether this requirement is in force for a form of the given commodity
    pub fn applies_to(self, commodity: Commodity) -> bool {
        match self {
            Requirement::Always => true,
            Requirement::Never => false,
            Requirement::OnlyFor(only) => only == commodity,
        }
    }
}

/// One configurable contract attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub cardinality: Cardinality,
    #[serde(default)]
    pub required: Requirement,
    /// Initial value for a fresh form; `None` means blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl FieldSpec {
    /// Create a single-value field
    pub fn single(key: &str, label: &str, required: Requirement) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            cardinality: Cardinality::Single,
            required,
            default: None,
        }
    }

    /// Create a multi-value field
    pub fn multi(key: &str, label: &str, required: Requirement) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            cardinality: Cardinality::Multi,
            required,
            default: None,
        }
    }

    /// Attach a non-blank default value
    pub fn with_default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }
}

/// Ordered field table for one commodity form. Keys are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Load a field table from its JSON representation
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by key
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|spec| spec.key.as_str())
    }

    /// Stock field table of the supply-contract configuration wizard
    pub fn contract() -> Self {
        use Requirement::{Always, Never, OnlyFor};

        Self::new(vec![
            FieldSpec::single("use_type", "Use type", Always).with_default("Domestico"),
            FieldSpec::multi("consumption", "Consumption", Always),
            FieldSpec::multi("billing_frequency", "Billing frequency", Always),
            FieldSpec::multi("payment_method", "Payment method", Always),
            FieldSpec::multi("bill_delivery_method", "Bill delivery method", Always),
            FieldSpec::multi("customer_age", "Customer age", Always),
            FieldSpec::multi(
                "duration_with_previous_supplier",
                "Duration with previous supplier",
                Always,
            ),
            FieldSpec::multi("source_market", "Source market", Always),
            FieldSpec::multi("previous_supplier", "Previous supplier", Always),
            FieldSpec::multi("residence", "Residence", Always),
            FieldSpec::single("price_type", "Price type", Always),
            FieldSpec::single("contract_duration", "Contract duration", Always),
            FieldSpec::single("tou_number", "Time-of-use tariffs", OnlyFor(Commodity::Power)),
            FieldSpec::multi("counter_2g", "2G counter", OnlyFor(Commodity::Power)),
            FieldSpec::multi("power_capacity", "Power capacity", OnlyFor(Commodity::Power)),
            FieldSpec::single("record_id", "Product record", Never),
        ])
    }
}
