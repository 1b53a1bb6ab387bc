//! Gemini (Google AI) multimodal provider.

use super::{ExtractionFailed, ImageExtractor, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Fixed directive keeping the model output machine-parseable.
const SYSTEM_INSTRUCTION: &str = "You are a specialized data extraction AI. Your goal is to \
    analyze an image and return strictly valid JSON. Do not include markdown formatting like \
    ```json ... ```, just the raw JSON string.";

/// Gemini API provider.
///
/// The API key is injected at construction and sent via the `x-goog-api-key`
/// header; it is never read from the environment here and never logged.
#[derive(Debug)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_default_model(api_key: String) -> Self {
        Self::new(api_key, DEFAULT_MODEL.to_string())
    }

    async fn generate(
        &self,
        image_base64: &str,
        mime_type: &str,
        instruction: &str,
    ) -> Result<String, LlmError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline_image(mime_type, image_base64),
                    Part::text(instruction),
                ],
            }],
            system_instruction: Content {
                parts: vec![Part::text(SYSTEM_INSTRUCTION)],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let url = format!("{}/{}:generateContent", BASE_URL, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        parse_response(status, &body)
    }
}

#[async_trait]
impl ImageExtractor for GeminiClient {
    async fn extract_json(
        &self,
        image_base64: &str,
        mime_type: &str,
        instruction: &str,
    ) -> Result<String, ExtractionFailed> {
        self.generate(image_base64, mime_type, instruction)
            .await
            .map_err(|e| {
                log::error!("Gemini API error: {}", e);
                ExtractionFailed
            })
    }
}

/// Gemini `generateContent` request format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline_image(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

/// Gemini `generateContent` response format.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Error envelope returned by the API on non-200 statuses.
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiApiError,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

fn parse_response(status: u16, body: &str) -> Result<String, LlmError> {
    if status != 200 {
        if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(body) {
            return Err(LlmError::ApiError {
                status,
                message: error_response.error.message,
            });
        }
        return Err(LlmError::ApiError {
            status,
            message: body.to_string(),
        });
    }

    let response: GeminiResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ParseError(e.to_string()))?;

    let text = response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .find_map(|p| p.text)
        .ok_or_else(|| LlmError::ParseError("No text content in response".to_string()))?;

    Ok(text.trim().to_string())
}
