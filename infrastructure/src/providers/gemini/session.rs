//! Gemini LLM session implementation
//!
//! `generateContent` is stateless, so the session keeps the transcript
//! locally and sends all of it on every call.

use super::client::GeminiClient;
use super::types::{self, Content, Tool};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use toolchat_application::ports::llm_gateway::{GatewayError, LlmSession};
use toolchat_domain::{ModelResponse, ToolResult};

pub struct GeminiSession {
    client: Arc<GeminiClient>,
    tools: Vec<Tool>,
    /// Transcript so far. Holding the lock for a whole exchange keeps sends
    /// on one session strictly ordered.
    contents: Mutex<Vec<Content>>,
}

impl GeminiSession {
    pub(crate) fn new(client: Arc<GeminiClient>, history: Vec<Content>, tools: Vec<Tool>) -> Self {
        Self {
            client,
            tools,
            contents: Mutex::new(history),
        }
    }

    /// Append `turn`, call the API and record the model's reply.
    ///
    /// On failure the transcript is left as it was before the call.
    async fn exchange(&self, turn: Content) -> Result<ModelResponse, GatewayError> {
        let mut contents = self.contents.lock().await;
        contents.push(turn);

        let (reply, model_version) = match self.client.generate(&contents, &self.tools).await {
            Ok(r) => r,
            Err(e) => {
                contents.pop();
                return Err(e);
            }
        };

        let response = types::convert_content(&reply)
            .with_model(model_version.unwrap_or_else(|| self.client.model.clone()));
        contents.push(Content {
            role: Some("model".to_string()),
            parts: reply.parts,
        });

        Ok(response)
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &str {
        &self.client.model
    }

    async fn send(&self, content: &str) -> Result<ModelResponse, GatewayError> {
        self.exchange(Content::user_text(content)).await
    }

    async fn send_tool_results(
        &self,
        results: &[ToolResult],
    ) -> Result<ModelResponse, GatewayError> {
        self.exchange(types::tool_results_content(results)).await
    }
}
