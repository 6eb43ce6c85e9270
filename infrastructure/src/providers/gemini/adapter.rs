//! Gemini gateway
//!
//! Holds the HTTP client and fixed generation settings; every chat run opens
//! its own [`GeminiSession`] from it.

use super::client::GeminiClient;
use super::session::GeminiSession;
use super::types::{self, Content, GenerationConfig, Tool};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use toolchat_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use toolchat_domain::ConversationHistory;
use tracing::debug;

/// Default Generative Language API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini API client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f64,
    pub system_prompt: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: 1000,
            temperature: 0.7,
            system_prompt: None,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`LlmGateway`] backed by the Gemini REST API.
pub struct GeminiGateway {
    client: Arc<GeminiClient>,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let url = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            client: Arc::new(GeminiClient {
                http,
                url,
                api_key: config.api_key,
                model: config.model,
                generation_config: GenerationConfig {
                    max_output_tokens: config.max_output_tokens,
                    temperature: config.temperature,
                },
                system_instruction: config.system_prompt.map(Content::system),
            }),
        })
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    fn model_name(&self) -> &str {
        &self.client.model
    }

    async fn open_session(
        &self,
        history: &ConversationHistory,
        tools: &[serde_json::Value],
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        if self.client.api_key.trim().is_empty() {
            return Err(GatewayError::AuthFailed("Gemini API key is empty".to_string()));
        }

        let tools = if tools.is_empty() {
            Vec::new()
        } else {
            vec![Tool {
                function_declarations: tools.to_vec(),
            }]
        };

        debug!(
            model = %self.client.model,
            history = history.len(),
            "Opening Gemini session"
        );

        Ok(Box::new(GeminiSession::new(
            self.client.clone(),
            types::history_to_contents(history),
            tools,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_server;
    use axum::{
        Json, Router,
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::post,
    };
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use toolchat_domain::{Message, ToolError, ToolResult};

    /// Fake Gemini endpoint: replays scripted replies and records requests.
    #[derive(Clone, Default)]
    struct FakeGemini {
        replies: Arc<Mutex<VecDeque<(StatusCode, Value)>>>,
        requests: Arc<Mutex<Vec<(String, Value)>>>,
        delay: Option<Duration>,
    }

    impl FakeGemini {
        fn new(replies: Vec<(StatusCode, Value)>) -> Self {
            Self {
                replies: Arc::new(Mutex::new(replies.into())),
                ..Default::default()
            }
        }

        fn requests(&self) -> Vec<(String, Value)> {
            self.requests.lock().unwrap().clone()
        }
    }

    async fn generate(
        State(fake): State<FakeGemini>,
        Path(call): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Response {
        if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("test-key") {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": { "code": 403, "message": "Permission denied" } })),
            )
                .into_response();
        }
        if let Some(delay) = fake.delay {
            tokio::time::sleep(delay).await;
        }
        fake.requests.lock().unwrap().push((call, body));
        let (status, reply) = fake
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, json!({})));
        (status, Json(reply)).into_response()
    }

    async fn gateway(fake: FakeGemini, api_key: &str) -> GeminiGateway {
        let app = Router::new()
            .route("/models/:call", post(generate))
            .with_state(fake);
        let base = spawn_server(app).await;
        GeminiGateway::new(
            GeminiConfig::new(api_key)
                .with_base_url(base)
                .with_system_prompt(Some("You are a weather assistant.".to_string()))
                .with_timeout(Duration::from_secs(5)),
        )
        .unwrap()
    }

    fn text_reply(text: &str) -> (StatusCode, Value) {
        (
            StatusCode::OK,
            json!({
                "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }],
                "modelVersion": "gemini-1.5-flash-002"
            }),
        )
    }

    fn call_reply(city: &str) -> (StatusCode, Value) {
        (
            StatusCode::OK,
            json!({
                "candidates": [{ "content": { "role": "model", "parts": [
                    { "functionCall": { "name": "getCurrentWeather", "args": { "city": city } } }
                ] } }]
            }),
        )
    }

    fn tools() -> Vec<Value> {
        vec![json!({ "name": "getCurrentWeather", "description": "Weather", "parameters": {} })]
    }

    #[tokio::test]
    async fn test_tool_round_trip() {
        let fake = FakeGemini::new(vec![call_reply("Taipei"), text_reply("It's 28°C in Taipei.")]);
        let gateway = gateway(fake.clone(), "test-key").await;
        let session = gateway
            .open_session(&ConversationHistory::new(), &tools())
            .await
            .unwrap();

        let first = session.send("Weather in Taipei?").await.unwrap();
        assert_eq!(first.tool_calls()[0].get_string("city"), Some("Taipei"));
        assert_eq!(first.model.as_deref(), Some("gemini-1.5-flash"));

        let results = vec![ToolResult::success(
            "getCurrentWeather",
            json!({ "temperature": 28 }),
        )];
        let second = session.send_tool_results(&results).await.unwrap();
        assert_eq!(second.text().as_deref(), Some("It's 28°C in Taipei."));
        assert_eq!(second.model.as_deref(), Some("gemini-1.5-flash-002"));

        let requests = fake.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, "gemini-1.5-flash:generateContent");

        let body = &requests[0].1;
        assert_eq!(body["tools"][0]["functionDeclarations"][0]["name"], "getCurrentWeather");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1000);
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are a weather assistant."
        );

        let contents = requests[1].1["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["functionCall"]["args"]["city"], "Taipei");
        assert_eq!(
            contents[2]["parts"][0]["functionResponse"]["response"]["result"]["temperature"],
            28
        );
    }

    #[tokio::test]
    async fn test_thought_signature_sent_back() {
        let signed_call = (
            StatusCode::OK,
            json!({
                "candidates": [{ "content": { "role": "model", "parts": [{
                    "functionCall": { "name": "getCurrentWeather", "args": { "city": "Taipei" } },
                    "thoughtSignature": "c2lnbmF0dXJl"
                }] } }]
            }),
        );
        let fake = FakeGemini::new(vec![signed_call, text_reply("Sunny.")]);
        let gateway = gateway(fake.clone(), "test-key").await;
        let session = gateway
            .open_session(&ConversationHistory::new(), &tools())
            .await
            .unwrap();

        session.send("Weather in Taipei?").await.unwrap();
        let results = vec![ToolResult::success("getCurrentWeather", json!({ "temp": 28 }))];
        session.send_tool_results(&results).await.unwrap();

        let requests = fake.requests();
        let echoed = &requests[1].1["contents"][1]["parts"][0];
        assert_eq!(echoed["thoughtSignature"], "c2lnbmF0dXJl");
        assert_eq!(echoed["functionCall"]["name"], "getCurrentWeather");
    }

    #[tokio::test]
    async fn test_history_seeds_transcript() {
        let fake = FakeGemini::new(vec![text_reply("You're welcome.")]);
        let gateway = gateway(fake.clone(), "test-key").await;
        let history = ConversationHistory::new()
            .push(Message::user("Hi"))
            .push(Message::model("Hello!"));

        let session = gateway.open_session(&history, &[]).await.unwrap();
        session.send("Thanks").await.unwrap();

        let body = &fake.requests()[0].1;
        let roles: Vec<_> = body["contents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["role"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert!(body.get("tools").is_none());
    }

    #[tokio::test]
    async fn test_failed_send_leaves_transcript_unchanged() {
        let fake = FakeGemini::new(vec![
            (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": { "code": 429, "message": "Resource has been exhausted" } }),
            ),
            text_reply("Hello"),
        ]);
        let gateway = gateway(fake.clone(), "test-key").await;
        let session = gateway
            .open_session(&ConversationHistory::new(), &tools())
            .await
            .unwrap();

        let err = session.send("Hi").await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::QuotaExceeded("Resource has been exhausted".to_string())
        );

        session.send("Hi again").await.unwrap();
        let contents = fake.requests()[1].1["contents"].as_array().unwrap().clone();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["parts"][0]["text"], "Hi again");
    }

    #[tokio::test]
    async fn test_invalid_api_key() {
        let fake = FakeGemini::new(vec![(
            StatusCode::BAD_REQUEST,
            json!({ "error": {
                "code": 400,
                "message": "API key not valid.",
                "details": [{ "reason": "API_KEY_INVALID" }]
            } }),
        )]);
        let gateway = gateway(fake, "test-key").await;
        let session = gateway
            .open_session(&ConversationHistory::new(), &tools())
            .await
            .unwrap();

        let err = session.send("Hi").await.unwrap_err();
        assert!(matches!(err, GatewayError::AuthFailed(_)));
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let gateway = gateway(FakeGemini::default(), "wrong-key").await;
        let session = gateway
            .open_session(&ConversationHistory::new(), &tools())
            .await
            .unwrap();

        let err = session.send("Hi").await.unwrap_err();
        assert_eq!(err, GatewayError::AuthFailed("Permission denied".to_string()));
    }

    #[tokio::test]
    async fn test_empty_api_key_fails_at_open() {
        let gateway = gateway(FakeGemini::default(), "").await;
        let err = gateway
            .open_session(&ConversationHistory::new(), &tools())
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind(), toolchat_domain::ErrorKind::AuthError);
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let fake = FakeGemini {
            delay: Some(Duration::from_secs(2)),
            ..FakeGemini::new(vec![text_reply("late")])
        };
        let app = Router::new()
            .route("/models/:call", post(generate))
            .with_state(fake);
        let base = spawn_server(app).await;
        let gateway = GeminiGateway::new(
            GeminiConfig::new("test-key")
                .with_base_url(base)
                .with_timeout(Duration::from_millis(100)),
        )
        .unwrap();
        let session = gateway
            .open_session(&ConversationHistory::new(), &[])
            .await
            .unwrap();

        assert_eq!(session.send("Hi").await.unwrap_err(), GatewayError::Timeout);
    }

    #[tokio::test]
    async fn test_failed_tool_result_encoding() {
        let fake = FakeGemini::new(vec![call_reply("Atlantis"), text_reply("Sorry.")]);
        let gateway = gateway(fake.clone(), "test-key").await;
        let session = gateway
            .open_session(&ConversationHistory::new(), &tools())
            .await
            .unwrap();

        session.send("Atlantis?").await.unwrap();
        session
            .send_tool_results(&[ToolResult::failure(
                "getCurrentWeather",
                ToolError::execution_failed("city not found: Atlantis"),
            )])
            .await
            .unwrap();

        let contents = fake.requests()[1].1["contents"].clone();
        assert_eq!(
            contents[2]["parts"][0]["functionResponse"]["response"]["error"],
            "city not found: Atlantis"
        );
    }
}
