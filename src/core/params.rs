use std::collections::HashMap;

use thiserror::Error;

use crate::core::models::request::Parameter;

/// Parameters of a single invocation, keyed by name.
pub type ParamMap = HashMap<String, String>;

#[derive(Error, Debug, PartialEq)]
pub enum ParamError {
    #[error("Invalid value for {name}: '{value}' is not a non-negative integer")]
    InvalidInteger { name: String, value: String },
    #[error("Invalid value for {name}: {value} exceeds the maximum of {max}")]
    OutOfRange { name: String, value: u32, max: u32 },
}

/// Collect the ordered parameter list into a map. Later duplicates overwrite earlier ones.
pub fn extract(parameters: &[Parameter]) -> ParamMap {
    parameters
        .iter()
        .map(|p| (p.name.clone(), p.value.clone()))
        .collect()
}

/// Look up `name`, falling back to `default` when absent.
pub fn get_or(params: &ParamMap, name: &str, default: impl Into<String>) -> String {
    params.get(name).cloned().unwrap_or_else(|| default.into())
}

/// Parse an optional non-negative integer parameter bounded by `max`.
pub fn get_bounded_u32(
    params: &ParamMap,
    name: &str,
    default: u32,
    max: u32,
) -> Result<u32, ParamError> {
    let value = match params.get(name) {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ParamError::InvalidInteger {
                name: name.to_string(),
                value: raw.clone(),
            })?,
        None => default,
    };
    if value > max {
        return Err(ParamError::OutOfRange {
            name: name.to_string(),
            value,
            max,
        });
    }
    Ok(value)
}
