//! Shared HTTP client for the Gemini `generateContent` endpoint.

use super::types::{
    self, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Tool,
};
use toolchat_application::ports::llm_gateway::GatewayError;
use tracing::debug;

/// Immutable request settings shared by the gateway and all its sessions.
#[derive(Debug)]
pub(crate) struct GeminiClient {
    pub(crate) http: reqwest::Client,
    pub(crate) url: String,
    pub(crate) api_key: String,
    pub(crate) model: String,
    pub(crate) generation_config: GenerationConfig,
    pub(crate) system_instruction: Option<Content>,
}

impl GeminiClient {
    /// Run one `generateContent` call over the full transcript.
    ///
    /// Returns the first candidate's content and the model version the
    /// provider reports.
    pub(crate) async fn generate(
        &self,
        contents: &[Content],
        tools: &[Tool],
    ) -> Result<(Content, Option<String>), GatewayError> {
        let request = GenerateContentRequest {
            contents,
            system_instruction: self.system_instruction.as_ref(),
            tools,
            generation_config: &self.generation_config,
        };

        debug!(
            model = %self.model,
            contents = contents.len(),
            "Calling Gemini generateContent"
        );

        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| types::convert_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "Gemini request failed");
            return Err(types::classify_error(status.as_u16(), &body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let model_version = body.model_version.clone();

        Ok((types::first_candidate(body)?, model_version))
    }
}
