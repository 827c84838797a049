//! RemoteResponder -- [`Responder`] that delegates to a hosted endpoint.
//!
//! Sends `{ inputs, parameters }` with a bearer token and expects either an
//! error object or a list whose first element carries `generated_text`.
//! Nothing is learned locally, so this responder never trains and the
//! pipeline does not record its exchanges.
//!
//! The bearer token is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use mimic_core::responder::Responder;
use mimic_types::config::{GenerationParameters, RemoteConfig};
use mimic_types::error::{ModelError, RemoteError};
use mimic_types::memory::Exchange;
use mimic_types::model::{Readiness, TrainOutcome};

use super::types::{InferenceRequest, InferenceResponse};

/// Reply when the provider reports an error in its payload.
pub const PROVIDER_UNAVAILABLE_REPLY: &str =
    "The model is temporarily unavailable. Please try again in a moment.";

/// Reply when the endpoint could not be reached or answered garbage.
pub const TRANSPORT_FAILURE_REPLY: &str = "I couldn't reach the model. Please try again later.";

/// Reply when the provider succeeded but generated nothing.
pub const EMPTY_GENERATION_REPLY: &str = "I could not generate a response.";

/// Hosted text-generation responder.
///
/// Does NOT derive Debug, keeping the token out of any formatted output.
pub struct RemoteResponder {
    client: reqwest::Client,
    endpoint: String,
    token: Option<SecretString>,
    model_name: String,
    parameters: GenerationParameters,
}

impl RemoteResponder {
    /// Create a responder for `endpoint` with an explicit request timeout.
    pub fn new(
        endpoint: impl Into<String>,
        parameters: GenerationParameters,
        timeout: Duration,
        token: Option<SecretString>,
        model_name: impl Into<String>,
    ) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
            model_name: model_name.into(),
            parameters,
        })
    }

    /// Create a responder from the `[remote]` config section.
    pub fn from_config(
        config: &RemoteConfig,
        model_name: impl Into<String>,
        token: Option<SecretString>,
    ) -> Result<Self, RemoteError> {
        Self::new(
            config.endpoint.clone(),
            config.generation.clone(),
            Duration::from_secs(config.timeout_secs),
            token,
            model_name,
        )
    }

    /// Call the endpoint and classify the outcome.
    pub async fn request(&self, text: &str) -> Result<String, RemoteError> {
        let body = InferenceRequest {
            inputs: text,
            parameters: &self.parameters,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Transport(format!("HTTP {status}: {error_body}")));
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Transport(format!("failed to parse response: {e}")))?;

        match parsed {
            InferenceResponse::Error { error } => {
                let message = match error {
                    serde_json::Value::String(message) => message,
                    other => other.to_string(),
                };
                Err(RemoteError::Provider(message))
            }
            InferenceResponse::Generations(generations) => {
                let text = generations
                    .into_iter()
                    .next()
                    .map(|g| g.generated_text.trim().to_string())
                    .unwrap_or_default();
                if text.is_empty() {
                    Err(RemoteError::EmptyGeneration)
                } else {
                    Ok(text)
                }
            }
        }
    }
}

/// Fixed user-visible text for each failure class.
pub fn fallback_reply(err: &RemoteError) -> &'static str {
    match err {
        RemoteError::Provider(_) => PROVIDER_UNAVAILABLE_REPLY,
        RemoteError::Transport(_) => TRANSPORT_FAILURE_REPLY,
        RemoteError::EmptyGeneration => EMPTY_GENERATION_REPLY,
    }
}

impl Responder for RemoteResponder {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn learns_from_memory(&self) -> bool {
        false
    }

    async fn readiness(&self) -> Readiness {
        Readiness::Ready
    }

    async fn generate(&self, text: &str) -> String {
        match self.request(text).await {
            Ok(reply) => {
                debug!(chars = reply.chars().count(), "remote generation succeeded");
                reply
            }
            Err(err) => {
                warn!(error = %err, "remote generation failed");
                fallback_reply(&err).to_string()
            }
        }
    }

    async fn train(&self, _exchanges: Vec<Exchange>) -> Result<TrainOutcome, ModelError> {
        Ok(TrainOutcome::NotSupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use serde_json::{Value, json};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/generate")
    }

    fn responder(endpoint: String) -> RemoteResponder {
        RemoteResponder::new(
            endpoint,
            GenerationParameters::default(),
            Duration::from_millis(300),
            Some(SecretString::from("test-token".to_string())),
            "remote-test",
        )
        .unwrap()
    }

    async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        Json(json!([{
            "generated_text": format!(
                "{} | {} | top_k={}",
                body["inputs"].as_str().unwrap_or_default(),
                auth,
                body["parameters"]["top_k"]
            )
        }]))
    }

    #[tokio::test]
    async fn test_success_returns_generated_text() {
        let endpoint = serve(Router::new().route("/generate", post(echo))).await;
        let reply = responder(endpoint).generate("hello").await;
        assert_eq!(reply, "hello | Bearer test-token | top_k=50");
    }

    #[tokio::test]
    async fn test_provider_error_payload() {
        let endpoint = serve(Router::new().route(
            "/generate",
            post(|| async { Json(json!({ "error": "Model is currently loading" })) }),
        ))
        .await;
        let responder = responder(endpoint);

        let err = responder.request("hello").await.unwrap_err();
        assert!(matches!(err, RemoteError::Provider(ref m) if m.contains("loading")));
        assert_eq!(responder.generate("hello").await, PROVIDER_UNAVAILABLE_REPLY);
    }

    #[tokio::test]
    async fn test_timeout_is_transport_failure() {
        let endpoint = serve(Router::new().route(
            "/generate",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!([{ "generated_text": "too late" }]))
            }),
        ))
        .await;
        let responder = responder(endpoint);

        assert!(matches!(
            responder.request("hello").await,
            Err(RemoteError::Transport(_))
        ));
        assert_eq!(responder.generate("hello").await, TRANSPORT_FAILURE_REPLY);
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_failure() {
        let endpoint = serve(Router::new().route(
            "/generate",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down").into_response() }),
        ))
        .await;
        assert_eq!(responder(endpoint).generate("hello").await, TRANSPORT_FAILURE_REPLY);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_transport_failure() {
        let endpoint = serve(Router::new().route(
            "/generate",
            post(|| async { "definitely not json" }),
        ))
        .await;
        assert!(matches!(
            responder(endpoint).request("hello").await,
            Err(RemoteError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_generation() {
        let endpoint = serve(Router::new().route(
            "/generate",
            post(|| async { Json(json!([{ "generated_text": "   " }])) }),
        ))
        .await;
        assert_eq!(responder(endpoint).generate("hello").await, EMPTY_GENERATION_REPLY);
    }

    #[tokio::test]
    async fn test_empty_generation_list() {
        let endpoint = serve(Router::new().route(
            "/generate",
            post(|| async { Json(json!([])) }),
        ))
        .await;
        assert!(matches!(
            responder(endpoint).request("hello").await,
            Err(RemoteError::EmptyGeneration)
        ));
    }

    #[test]
    fn test_fallback_texts_are_distinct() {
        let texts = [
            fallback_reply(&RemoteError::Provider("x".into())),
            fallback_reply(&RemoteError::Transport("x".into())),
            fallback_reply(&RemoteError::EmptyGeneration),
        ];
        assert_ne!(texts[0], texts[1]);
        assert_ne!(texts[1], texts[2]);
        assert_ne!(texts[0], texts[2]);
    }

    #[tokio::test]
    async fn test_remote_responder_never_trains() {
        let responder = responder("http://127.0.0.1:9/generate".to_string());
        assert!(!responder.learns_from_memory());
        assert_eq!(responder.readiness().await, Readiness::Ready);
        assert!(matches!(
            responder.train(vec![Exchange::new("a", "b")]).await,
            Ok(TrainOutcome::NotSupported)
        ));
    }
}
