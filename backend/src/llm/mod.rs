//! Multimodal LLM providers for image extraction.
//!
//! Trait-based abstraction over the remote inference service so the HTTP
//! layer can be exercised with a fake provider in tests.

#[cfg(test)]
mod fake;
mod gemini;

#[cfg(test)]
pub use fake::FakeExtractor;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// The one message shown to users for any failed extraction call. Detail is
/// logged server-side only, never surfaced to the UI.
pub const EXTRACTION_FAILED: &str =
    "Failed to process image. Please ensure the image is clear and try again.";

/// Internal failure taxonomy. Providers log these with full detail, then
/// collapse them into [`ExtractionFailed`] at the trait boundary.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Opaque extraction failure carrying only the fixed user-facing message.
#[derive(Debug, Error)]
#[error("{}", EXTRACTION_FAILED)]
pub struct ExtractionFailed;

/// A provider that turns an image plus an instruction into JSON text.
///
/// Implementations make exactly one request per invocation and return the
/// trimmed text of the model response. There is no retry, no timeout beyond
/// the transport default, and no cancellation: an issued request runs to
/// completion or failure.
#[async_trait]
pub trait ImageExtractor: Send + Sync {
    async fn extract_json(
        &self,
        image_base64: &str,
        mime_type: &str,
        instruction: &str,
    ) -> Result<String, ExtractionFailed>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_error_uses_fixed_message() {
        assert_eq!(ExtractionFailed.to_string(), EXTRACTION_FAILED);
    }
}
