use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::formatter::{format_currency, serialize_currency};

/// One (time period, group) row of a cost-and-usage breakdown.
///
/// Serializes as `{"period": ..., "<dimension>": ..., "amount": "$x.xx"}` where
/// `<dimension>` is the lowercased group-by key (e.g. `service`, `region`).
#[derive(Debug, Clone, PartialEq)]
pub struct CostRecord {
    pub period: String,
    pub dimension: String,
    pub label: String,
    pub amount: f64,
}

impl Serialize for CostRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("period", &self.period)?;
        map.serialize_entry(&self.dimension, &self.label)?;
        map.serialize_entry("amount", &format_currency(self.amount))?;
        map.end()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct UsageReport {
    pub start_date: String,
    pub end_date: String,
    pub group_by: String,
    pub granularity: String,
    #[serde(serialize_with = "serialize_currency")]
    pub total: f64,
    pub breakdown: Vec<CostRecord>,
}
