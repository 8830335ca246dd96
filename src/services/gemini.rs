// src/services/gemini.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use serde::{Deserialize, Serialize};

use crate::{
    models::chat::{ChatMessage, ChatRole},
    services::text_generator::{AssistantError, TextGenerator},
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

// --- Formato JSON da API generateContent ---

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: text.to_string() }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    // Concatena as partes de texto do primeiro candidato
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().map(|part| part.text).collect())
            .unwrap_or_default()
    }
}

fn wire_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "model",
    }
}

/// Cliente do Google Gemini (AI Studio) via REST.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> Result<Self, AssistantError> {
        let headers = HeaderMap::from_iter([(
            HeaderName::from_static("x-goog-api-key"),
            HeaderValue::from_str(api_key).map_err(|_| AssistantError::InvalidApiKey)?,
        )]);

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate_content(&self, request: GenerateContentRequest) -> Result<String, AssistantError> {
        let response = self.http_client.post(self.endpoint()).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::BadResponse { status: status.as_u16(), body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed.text())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, context: Option<&str>) -> Result<String, AssistantError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: context.map(|c| Content::text(None, c)),
        };
        self.generate_content(request).await
    }

    async fn converse(
        &self,
        history: &[ChatMessage],
        new_message: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, AssistantError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|message| Content::text(Some(wire_role(message.role)), &message.text))
            .collect();
        contents.push(Content::text(Some("user"), new_message));

        let request = GenerateContentRequest {
            contents,
            system_instruction: system_instruction.map(|c| Content::text(None, c)),
        };
        self.generate_content(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_gemini_field_names() {
        let request = GenerateContentRequest {
            contents: vec![Content::text(Some("user"), "Oi")],
            system_instruction: Some(Content::text(None, "Persona")),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Oi" }] }],
                "systemInstruction": { "parts": [{ "text": "Persona" }] }
            })
        );
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "**Riscos**" }, { "text": "\n- Altura" }] } },
                { "content": { "role": "model", "parts": [{ "text": "ignorado" }] } }
            ]
        }))
        .unwrap();

        assert_eq!(response.text(), "**Riscos**\n- Altura");

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new("chave", "https://example.test/v1beta/", DEFAULT_MODEL, Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), "https://example.test/v1beta/models/gemini-2.5-flash:generateContent");
    }
}
