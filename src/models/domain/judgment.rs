use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Reads an optional judgment field, defaulting on `null` or a mistyped value.
fn null_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

/// Structured risk judgment returned by the completion provider.
///
/// Only `risk_score`, `reasons` and `suspicious_patterns` are required; the other
/// fields default when the provider omits them, sends `null` or sends the wrong type.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JudgmentResult {
    #[validate(range(min = 0.0, max = 100.0))]
    pub risk_score: f64,
    #[serde(default, deserialize_with = "null_or_default")]
    pub translation_likelihood: f64,
    pub reasons: Vec<String>,
    pub suspicious_patterns: Vec<String>,
    #[serde(default, deserialize_with = "null_or_default")]
    pub answer_quality: f64,
    #[serde(default, deserialize_with = "null_or_default")]
    pub recommendation: String,
}

impl JudgmentResult {
    /// Conservative value used whenever the judgment path fails. Mid-range so
    /// the attempt leans toward manual review.
    pub fn fallback() -> Self {
        Self {
            risk_score: 50.0,
            translation_likelihood: 0.0,
            reasons: vec!["Judgment analysis failed".to_string()],
            suspicious_patterns: vec![],
            answer_quality: 0.5,
            recommendation: "Manual review recommended".to_string(),
        }
    }
}
