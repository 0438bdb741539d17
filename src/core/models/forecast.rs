use serde::Serialize;

use crate::core::formatter::serialize_currency;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRecord {
    pub period: String,
    #[serde(serialize_with = "serialize_currency")]
    pub mean: f64,
    /// Lower prediction bound, 0 when the API omits it.
    #[serde(serialize_with = "serialize_currency")]
    pub low: f64,
    /// Upper prediction bound, 0 when the API omits it.
    #[serde(serialize_with = "serialize_currency")]
    pub high: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub forecast_period: String,
    pub granularity: String,
    #[serde(serialize_with = "serialize_currency")]
    pub total_forecast: f64,
    pub breakdown: Vec<ForecastRecord>,
}
