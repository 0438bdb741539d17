pub mod anomaly;
pub mod cost;
pub mod envelope;
pub mod forecast;
pub mod request;
