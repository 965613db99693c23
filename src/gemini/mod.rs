pub mod image_client;
pub mod text_client;

use serde_json::json;

use crate::config::{GeminiConfig, DEFAULT_BASE_URL, IMAGE_MODEL, PROVIDER_NAME, TEXT_MODEL};
use crate::models::gemini::Part;

pub use image_client::{ImageClient, ImageOutput};
pub use text_client::{TextClient, TextOutput};

/// Client for the Gemini REST API, split into per-capability subclients.
#[derive(Clone)]
pub struct GeminiClient {
    text_client: TextClient,
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let http = reqwest::Client::new();
        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let text_model = config.text_model.unwrap_or_else(|| TEXT_MODEL.to_string());
        let image_model = config
            .image_model
            .unwrap_or_else(|| IMAGE_MODEL.to_string());

        Self {
            text_client: TextClient::new(
                http.clone(),
                base_url.clone(),
                config.api_key.clone(),
                text_model,
            ),
            image_client: ImageClient::new(http, base_url, config.api_key, image_model),
        }
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    /// Minimal round-trip through the text model. Failures map to `false`.
    pub async fn check_text_health(&self) -> bool {
        match self.text_client.generate("Test connection", Some(5), None).await {
            Ok(_) => {
                log::debug!("Text model health check passed");
                true
            }
            Err(e) => {
                log::warn!("Text model health check failed: {}", e);
                false
            }
        }
    }

    /// Minimal round-trip through the image model. Failures map to `false`.
    pub async fn check_image_health(&self) -> bool {
        let parts = vec![Part::text("A single blue dot on a white background")];
        match self.image_client.generate(parts, false, None).await {
            Ok(_) => {
                log::debug!("Image model health check passed");
                true
            }
            Err(e) => {
                log::warn!("Image model health check failed: {}", e);
                false
            }
        }
    }

    /// Static descriptor of the configured provider and models.
    pub fn provider_info(&self) -> serde_json::Value {
        json!({
            "provider": PROVIDER_NAME,
            "model": self.text_client.model(),
            "imageModel": self.image_client.model(),
            "capabilities": [
                "Ultra-fast text generation",
                "Advanced prompt enhancement",
                "Creative suggestions",
                "Native image generation and editing",
                "Multi-image composition",
                "Category-aware processing",
            ],
            "features": {
                "speed": "Ultra-fast (2.0 Flash)",
                "quality": "High",
                "costEfficiency": "Excellent",
                "creativity": "Very High",
            },
            "note": "Gemini 2.0 Flash handles prompt engineering; Gemini 2.5 Flash Image Preview handles image generation.",
        })
    }
}
