use serde::Serializer;

/// Returns "$X.XX".
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// The amount as it reads once formatted, i.e. rounded to whole cents.
pub fn displayed_amount(amount: f64) -> f64 {
    format!("{:.2}", amount).parse().unwrap_or(amount)
}

/// Returns "X.X%".
pub fn format_percentage(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Serde adapter writing an `f64` amount as a currency string.
pub fn serialize_currency<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_currency(*amount))
}

/// Serde adapter writing an `f64` percentage as a one-decimal percentage string.
pub fn serialize_percentage<S: Serializer>(
    percent: &f64,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_percentage(*percent))
}
