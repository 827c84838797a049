//! Wire types for the hosted text-generation endpoint.

use serde::{Deserialize, Serialize};

use mimic_types::config::GenerationParameters;

/// Request body: the prompt plus the fixed generation policy.
#[derive(Debug, Serialize)]
pub struct InferenceRequest<'a> {
    pub inputs: &'a str,
    pub parameters: &'a GenerationParameters,
}

/// Response body: either a list of generations or a provider error object.
///
/// Variant order matters for untagged parsing: a struct variant would also
/// accept a sequence positionally, so the list form is tried first.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InferenceResponse {
    Generations(Vec<Generation>),
    Error { error: serde_json::Value },
}

#[derive(Debug, Deserialize)]
pub struct Generation {
    #[serde(default)]
    pub generated_text: String,
}
