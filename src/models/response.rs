use serde::{Deserialize, Serialize};

use crate::config::PROVIDER_NAME;

/// Uniform wrapper returned by every text-oriented operation. Failures are
/// reported in-band: `success` is false, `error` carries the message and
/// `metadata` is still fully populated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub metadata: ResponseMetadata,
}

impl<T> AiResponse<T> {
    pub fn ok(data: T, metadata: ResponseMetadata) -> Self {
        AiResponse {
            success: true,
            data: Some(data),
            error: None,
            metadata,
        }
    }

    /// Failure envelope. `fallback` lets an operation hand back something
    /// usable anyway (the enhance flow returns the caller's original prompt).
    pub fn fail(error: impl Into<String>, fallback: Option<T>, metadata: ResponseMetadata) -> Self {
        AiResponse {
            success: false,
            data: fallback,
            error: Some(error.into()),
            metadata,
        }
    }
}

/// Wrapper for operations that produce images.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub success: bool,
    pub images: Vec<GeneratedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub metadata: ResponseMetadata,
}

impl ImageResponse {
    pub fn ok(
        images: Vec<GeneratedImage>,
        text_response: Option<String>,
        metadata: ResponseMetadata,
    ) -> Self {
        ImageResponse {
            success: true,
            images,
            text_response,
            enhanced_prompt: None,
            error: None,
            metadata,
        }
    }

    pub fn fail(error: impl Into<String>, metadata: ResponseMetadata) -> Self {
        ImageResponse {
            success: false,
            images: Vec::new(),
            text_response: None,
            enhanced_prompt: None,
            error: Some(error.into()),
            metadata,
        }
    }

    pub fn with_enhanced_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.enhanced_prompt = Some(prompt.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub provider: String,
    pub model: String,
    /// Wall-clock duration of the outward provider call, in milliseconds.
    pub processing_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_generated: Option<usize>,
}

impl ResponseMetadata {
    pub fn text(model: impl Into<String>, processing_time: u64, tokens_used: Option<u32>) -> Self {
        ResponseMetadata {
            provider: PROVIDER_NAME.to_string(),
            model: model.into(),
            processing_time,
            tokens_used,
            images_generated: None,
        }
    }

    pub fn image(
        model: impl Into<String>,
        processing_time: u64,
        tokens_used: Option<u32>,
        images_generated: usize,
    ) -> Self {
        ResponseMetadata {
            provider: PROVIDER_NAME.to_string(),
            model: model.into(),
            processing_time,
            tokens_used,
            images_generated: Some(images_generated),
        }
    }
}

/// One generated image, base64-encoded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub data: String,
    pub format: String,
    pub mime_type: String,
    /// Decoded size in bytes; derived from the base64 length when the
    /// provider does not report one.
    pub file_size: usize,
    pub file_name: String,
}

/// Structured judgment of an existing prompt, parsed verbatim from the
/// provider's JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptAnalysis {
    pub analysis: String,
    pub improvements: Vec<String>,
    pub score: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_keeps_metadata_and_fallback() {
        let metadata = ResponseMetadata::text("gemini-2.0-flash-exp", 42, None);
        let response = AiResponse::fail("quota exceeded", Some("a red car".to_string()), metadata);

        assert!(!response.success);
        assert_eq!(response.data.as_deref(), Some("a red car"));
        assert_eq!(response.metadata.processing_time, 42);
        assert!(response.metadata.tokens_used.is_none());
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let metadata = ResponseMetadata::image("m", 7, Some(12), 1);
        let response = ImageResponse::ok(Vec::new(), Some("done".into()), metadata);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["metadata"]["processingTime"], 7);
        assert_eq!(value["metadata"]["imagesGenerated"], 1);
        assert_eq!(value["textResponse"], "done");
        assert!(value.get("enhancedPrompt").is_none());
    }
}
