//! Wire types for the Gemini `generateContent` API and their conversions to
//! and from domain types.

use serde::{Deserialize, Serialize};
use toolchat_application::ports::llm_gateway::GatewayError;
use toolchat_domain::{ContentBlock, ConversationHistory, ModelResponse, Role, ToolCall, ToolResult};

/// Detail reason Gemini reports (with HTTP 400) for a rejected API key.
const API_KEY_INVALID: &str = "API_KEY_INVALID";

// ─── Wire types ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One part of a content turn. Exactly one known field is set on the parts
/// this adapter produces.
///
/// Fields the adapter does not interpret (`thoughtSignature`, `inlineData`, ...)
/// are kept in `extra` so a model turn is sent back exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Provider-neutral `{name, description, parameters}` declarations
    pub function_declarations: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: &'a [Content],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<&'a Content>,
    #[serde(skip_serializing_if = "<[Tool]>::is_empty")]
    pub tools: &'a [Tool],
    pub generation_config: &'a GenerationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

// ─── Domain → Gemini ─────────────────────────────────────────────

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.into()),
                ..Default::default()
            }],
        }
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("model".to_string()),
            ..Self::user_text(text)
        }
    }

    /// System instruction content (no role).
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            ..Self::user_text(text)
        }
    }
}

/// Map prior turns to `user` / `model` contents.
pub fn history_to_contents(history: &ConversationHistory) -> Vec<Content> {
    history
        .iter()
        .map(|m| match m.role {
            Role::User => Content::user_text(&m.content),
            Role::Model => Content::model_text(&m.content),
        })
        .collect()
}

/// Encode tool results as one turn of `functionResponse` parts.
///
/// Gemini correlates responses to the pending calls by position, so the
/// parts keep the order of `results`.
pub fn tool_results_content(results: &[ToolResult]) -> Content {
    let parts = results
        .iter()
        .map(|r| {
            let response = match (&r.payload, r.error_message()) {
                (Some(payload), _) if r.success => serde_json::json!({ "result": payload }),
                (_, Some(error)) => serde_json::json!({ "error": error }),
                _ => serde_json::json!({ "error": "tool produced no output" }),
            };
            Part {
                function_response: Some(FunctionResponse {
                    name: r.tool_name.clone(),
                    response,
                }),
                ..Default::default()
            }
        })
        .collect();

    Content {
        role: Some("user".to_string()),
        parts,
    }
}

// ─── Gemini → Domain ─────────────────────────────────────────────

/// Convert the first candidate's content to a domain response.
///
/// Parts keep their order; a turn carrying both text and function calls is
/// intermediate because it has tool calls.
pub fn convert_content(content: &Content) -> ModelResponse {
    let blocks = content
        .parts
        .iter()
        .filter_map(|part| {
            if let Some(fc) = &part.function_call {
                let call = ToolCall {
                    name: fc.name.clone(),
                    arguments: fc.args.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
                };
                Some(ContentBlock::ToolCall(call))
            } else {
                part.text.clone().map(ContentBlock::Text)
            }
        })
        .collect();

    ModelResponse {
        content: blocks,
        model: None,
    }
}

/// Pick the content of the first candidate.
///
/// A candidate without content (e.g. stopped by a safety filter) yields an
/// empty model turn.
pub fn first_candidate(response: GenerateContentResponse) -> Result<Content, GatewayError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("no candidates in response".to_string()))?;

    Ok(candidate.content.unwrap_or(Content {
        role: Some("model".to_string()),
        parts: Vec::new(),
    }))
}

// ─── Errors ──────────────────────────────────────────────────────

/// Classify a non-success `generateContent` reply.
pub fn classify_error(status: u16, body: &str) -> GatewayError {
    let (message, details) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.details),
        Err(_) => (body.trim().to_string(), Vec::new()),
    };

    let key_invalid = details
        .iter()
        .any(|d| d.get("reason").and_then(|r| r.as_str()) == Some(API_KEY_INVALID));
    if status == 400 && key_invalid {
        return GatewayError::AuthFailed(message);
    }

    GatewayError::from_status(status, message)
}

/// Classify a transport-level failure (no HTTP reply).
pub fn convert_transport_error(err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_decode() {
        GatewayError::InvalidResponse(err.to_string())
    } else {
        GatewayError::ConnectionError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolchat_domain::{Message, ToolError};

    #[test]
    fn test_history_roles() {
        let history = ConversationHistory::new()
            .push(Message::user("Hi"))
            .push(Message::model("Hello"));

        let contents = history_to_contents(&history);

        assert_eq!(contents[0].role.as_deref(), Some("user"));
        assert_eq!(contents[1].role.as_deref(), Some("model"));
        assert_eq!(contents[1].parts[0].text.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_request_serialization() {
        let contents = vec![Content::user_text("Weather?")];
        let system = Content::system("Be brief.");
        let tools = vec![Tool {
            function_declarations: vec![json!({ "name": "getCurrentWeather" })],
        }];
        let config = GenerationConfig {
            max_output_tokens: 1000,
            temperature: 0.7,
        };

        let body = serde_json::to_value(GenerateContentRequest {
            contents: &contents,
            system_instruction: Some(&system),
            tools: &tools,
            generation_config: &config,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Weather?" }] }],
                "systemInstruction": { "parts": [{ "text": "Be brief." }] },
                "tools": [{ "functionDeclarations": [{ "name": "getCurrentWeather" }] }],
                "generationConfig": { "maxOutputTokens": 1000, "temperature": 0.7 }
            })
        );
    }

    #[test]
    fn test_request_without_tools_omits_field() {
        let config = GenerationConfig {
            max_output_tokens: 10,
            temperature: 0.0,
        };
        let body = serde_json::to_value(GenerateContentRequest {
            contents: &[],
            system_instruction: None,
            tools: &[],
            generation_config: &config,
        })
        .unwrap();

        assert!(body.get("tools").is_none());
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_tool_results_in_order() {
        let results = vec![
            ToolResult::success("getCurrentWeather", json!({ "temperature": 28 })),
            ToolResult::failure(
                "getCurrentWeather",
                ToolError::execution_failed("city not found: Atlantis"),
            ),
        ];

        let content = serde_json::to_value(tool_results_content(&results)).unwrap();

        assert_eq!(
            content,
            json!({
                "role": "user",
                "parts": [
                    { "functionResponse": {
                        "name": "getCurrentWeather",
                        "response": { "result": { "temperature": 28 } }
                    } },
                    { "functionResponse": {
                        "name": "getCurrentWeather",
                        "response": { "error": "city not found: Atlantis" }
                    } }
                ]
            })
        );
    }

    #[test]
    fn test_convert_function_calls() {
        let content: Content = serde_json::from_value(json!({
            "role": "model",
            "parts": [
                { "functionCall": { "name": "getCurrentWeather", "args": { "city": "Taipei" } } },
                { "functionCall": { "name": "getCurrentWeather", "args": { "city": "Tokyo" } } }
            ]
        }))
        .unwrap();

        let response = convert_content(&content);
        let calls = response.tool_calls();

        assert!(!response.is_final());
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].get_string("city"), Some("Taipei"));
        assert_eq!(calls[1].get_string("city"), Some("Tokyo"));
    }

    #[test]
    fn test_convert_text_and_unknown_parts() {
        let content: Content = serde_json::from_value(json!({
            "role": "model",
            "parts": [{ "text": "It's " }, { "inlineData": {} }, { "text": "28°C." }]
        }))
        .unwrap();

        let response = convert_content(&content);

        assert!(response.is_final());
        assert_eq!(response.text().as_deref(), Some("It's 28°C."));
    }

    #[test]
    fn test_model_turn_keeps_unknown_part_fields() {
        let turn = json!({
            "role": "model",
            "parts": [
                {
                    "functionCall": { "name": "getCurrentWeather", "args": { "city": "Taipei" } },
                    "thoughtSignature": "SIG123"
                },
                { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
            ]
        });

        let content: Content = serde_json::from_value(turn.clone()).unwrap();
        assert_eq!(content.parts[0].extra["thoughtSignature"], "SIG123");
        assert_eq!(
            convert_content(&content).tool_calls()[0].get_string("city"),
            Some("Taipei")
        );

        assert_eq!(serde_json::to_value(&content).unwrap(), turn);
    }

    #[test]
    fn test_produced_parts_have_no_extra_fields() {
        let content = Content::user_text("Hi");
        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            json!({ "role": "user", "parts": [{ "text": "Hi" }] })
        );
    }

    #[test]
    fn test_function_call_without_args() {
        let content: Content = serde_json::from_value(json!({
            "parts": [{ "functionCall": { "name": "getAirQuality" } }]
        }))
        .unwrap();

        let calls = convert_content(&content).tool_calls();
        assert_eq!(calls[0].name, "getAirQuality");
        assert!(calls[0].arguments.is_empty());
    }

    #[test]
    fn test_first_candidate() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(matches!(
            first_candidate(response),
            Err(GatewayError::InvalidResponse(_))
        ));

        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [{ "finishReason": "SAFETY" }] }))
                .unwrap();
        assert!(first_candidate(response).unwrap().parts.is_empty());
    }

    #[test]
    fn test_classify_invalid_api_key() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{
                    "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                    "reason": "API_KEY_INVALID"
                }]
            }
        })
        .to_string();

        assert_eq!(
            classify_error(400, &body),
            GatewayError::AuthFailed("API key not valid. Please pass a valid API key.".to_string())
        );
    }

    #[test]
    fn test_classify_by_status() {
        let body = r#"{"error":{"code":429,"message":"Resource exhausted"}}"#;
        assert_eq!(
            classify_error(429, body),
            GatewayError::QuotaExceeded("Resource exhausted".to_string())
        );
        assert!(matches!(classify_error(404, "{}"), GatewayError::ModelNotFound(_)));
        assert!(matches!(
            classify_error(503, "overloaded"),
            GatewayError::ServiceUnavailable(m) if m == "overloaded"
        ));
        assert!(matches!(
            classify_error(400, r#"{"error":{"message":"bad schema"}}"#),
            GatewayError::Provider { status: 400, .. }
        ));
    }
}
