use std::time::Instant;

use crate::config::GeminiConfig;
use crate::gemini::GeminiClient;
use crate::models::gemini::{Part, Tool};
use crate::models::request::{
    ComposeImagesRequest, EditImageRequest, EnhancePromptRequest, GenerateImageRequest,
    RefineImageRequest, TextImageRequest,
};
use crate::models::response::{AiResponse, ImageResponse, PromptAnalysis, ResponseMetadata};
use crate::{normalize, prompt};

/// Orchestrates one provider call per operation and always returns an
/// envelope: upstream failures are converted, never propagated.
#[derive(Clone)]
pub struct AiService {
    client: GeminiClient,
}

impl AiService {
    pub fn new(config: GeminiConfig) -> Self {
        log::info!("AI service initialized with Google Gemini");
        Self {
            client: GeminiClient::new(config),
        }
    }

    pub fn text_model(&self) -> String {
        self.client.text().model().to_string()
    }

    pub fn image_model(&self) -> String {
        self.client.image().model().to_string()
    }

    /// Rewrites a raw prompt into a professional image generation prompt.
    /// On failure the caller gets their original prompt back as `data`.
    pub async fn enhance_prompt(&self, request: EnhancePromptRequest) -> AiResponse<String> {
        let start = Instant::now();
        let EnhancePromptRequest {
            prompt,
            category,
            style,
        } = request;

        let category =
            category.unwrap_or_else(|| prompt::infer_category(&prompt).to_string());
        let style = style.unwrap_or_else(|| "photorealistic".to_string());

        log::debug!("Enhancing prompt: \"{:.50}...\"", prompt);

        let instruction = prompt::enhancement_instruction(&prompt, &category, &style);
        match self
            .client
            .text()
            .generate(&instruction, Some(200), Some(0.8))
            .await
        {
            Ok(output) => {
                let elapsed = start.elapsed().as_millis() as u64;
                log::debug!("Prompt enhanced in {}ms", elapsed);
                AiResponse::ok(
                    output.text,
                    ResponseMetadata::text(self.text_model(), elapsed, output.total_tokens),
                )
            }
            Err(e) => {
                log::error!("Prompt enhancement failed: {}", e);
                AiResponse::fail(
                    e.to_string(),
                    Some(prompt),
                    ResponseMetadata::text(
                        self.text_model(),
                        start.elapsed().as_millis() as u64,
                        None,
                    ),
                )
            }
        }
    }

    /// Generates `count` (clamped to 1..=10) diverse prompt suggestions for a
    /// category, parsed back out of the model's numbered list.
    pub async fn suggest_prompts(&self, category: &str, count: u8) -> AiResponse<Vec<String>> {
        let start = Instant::now();
        let count = count.clamp(1, 10);

        let instruction = prompt::suggestion_instruction(category, count);
        match self
            .client
            .text()
            .generate(&instruction, Some(500), Some(1.0))
            .await
        {
            Ok(output) => {
                let suggestions = normalize::parse_suggestions(&output.text, count as usize);
                AiResponse::ok(
                    suggestions,
                    ResponseMetadata::text(
                        self.text_model(),
                        start.elapsed().as_millis() as u64,
                        output.total_tokens,
                    ),
                )
            }
            Err(e) => {
                log::error!("Prompt suggestions failed: {}", e);
                AiResponse::fail(
                    e.to_string(),
                    Some(Vec::new()),
                    ResponseMetadata::text(
                        self.text_model(),
                        start.elapsed().as_millis() as u64,
                        None,
                    ),
                )
            }
        }
    }

    /// Structured judgment of an existing prompt. Malformed provider JSON is
    /// surfaced as a failure envelope, not repaired.
    pub async fn analyze_prompt(&self, prompt_text: &str) -> AiResponse<PromptAnalysis> {
        let start = Instant::now();

        let instruction = prompt::analysis_instruction(prompt_text);
        let outcome = match self
            .client
            .text()
            .generate(&instruction, Some(300), Some(0.3))
            .await
        {
            Ok(output) => normalize::parse_analysis(&output.text).map(|analysis| {
                (analysis, output.total_tokens)
            }),
            Err(e) => Err(e),
        };

        match outcome {
            Ok((analysis, tokens)) => AiResponse::ok(
                analysis,
                ResponseMetadata::text(
                    self.text_model(),
                    start.elapsed().as_millis() as u64,
                    tokens,
                ),
            ),
            Err(e) => {
                log::error!("Prompt analysis failed: {}", e);
                AiResponse::fail(
                    e.to_string(),
                    None,
                    ResponseMetadata::text(
                        self.text_model(),
                        start.elapsed().as_millis() as u64,
                        None,
                    ),
                )
            }
        }
    }

    /// Text-to-image generation. The prompt is enhanced locally with the
    /// requested style/ratio/quality descriptors before the single provider
    /// call; the enhanced prompt travels back in the envelope.
    pub async fn generate_image(&self, request: GenerateImageRequest) -> ImageResponse {
        let start = Instant::now();

        if request.prompt.trim().is_empty() {
            return self.image_failure(start, "No prompt provided");
        }

        let enhanced = prompt::style_enhancement(
            &request.prompt,
            request.style,
            request.aspect_ratio,
            request.quality,
        );
        let include_text = request.include_text.unwrap_or(false);

        log::info!("Generating image with model: {}", self.image_model());

        let parts = vec![Part::text(&enhanced)];
        match self.client.image().generate(parts, include_text, None).await {
            Ok(output) => self
                .image_success(start, &output.parts, output.total_tokens)
                .with_enhanced_prompt(enhanced),
            Err(e) => {
                log::error!("Image generation failed: {}", e);
                self.image_failure(start, e.to_string())
                    .with_enhanced_prompt(enhanced)
            }
        }
    }

    /// Edits a base image according to an operation-specific instruction.
    pub async fn edit_image(&self, request: EditImageRequest) -> ImageResponse {
        let start = Instant::now();

        if request.prompt.trim().is_empty() {
            return self.image_failure(start, "No prompt provided");
        }
        if request.base_image.trim().is_empty() {
            return self.image_failure(start, "No base image provided");
        }

        let instruction = prompt::edit_instruction(
            &request.prompt,
            request.operation,
            request.preserve_original.unwrap_or(false),
        );
        let include_text = request.include_text.unwrap_or(false);

        log::info!(
            "Editing image ({}) with model: {}",
            request
                .operation
                .map(|op| op.as_str())
                .unwrap_or("default"),
            self.image_model()
        );

        let parts = vec![
            Part::text(instruction),
            Part::inline_image("image/png", request.base_image),
        ];
        match self.client.image().generate(parts, include_text, None).await {
            Ok(output) => self.image_success(start, &output.parts, output.total_tokens),
            Err(e) => {
                log::error!("Image edit failed: {}", e);
                self.image_failure(start, e.to_string())
            }
        }
    }

    /// Combines several source images into one result.
    pub async fn compose_images(&self, request: ComposeImagesRequest) -> ImageResponse {
        let start = Instant::now();

        if request.prompt.trim().is_empty() {
            return self.image_failure(start, "No prompt provided");
        }
        if request.images.is_empty() {
            return self.image_failure(start, "No image files provided");
        }

        let instruction = prompt::composition_instruction(
            &request.prompt,
            request.composition_type,
            request.images.len(),
        );
        let include_text = request.include_text.unwrap_or(false);

        log::info!(
            "Composing {} images with model: {}",
            request.images.len(),
            self.image_model()
        );

        let mut parts = vec![Part::text(instruction)];
        parts.extend(
            request
                .images
                .into_iter()
                .map(|image| Part::inline_image("image/png", image)),
        );
        match self.client.image().generate(parts, include_text, None).await {
            Ok(output) => self.image_success(start, &output.parts, output.total_tokens),
            Err(e) => {
                log::error!("Image composition failed: {}", e);
                self.image_failure(start, e.to_string())
            }
        }
    }

    /// Iterative refinement: prior conversation turns are rendered into the
    /// instruction so the model continues from the latest image.
    pub async fn refine_image(&self, request: RefineImageRequest) -> ImageResponse {
        let start = Instant::now();

        if request.prompt.trim().is_empty() {
            return self.image_failure(start, "No prompt provided");
        }

        let history = request.conversation_history.unwrap_or_default();
        let instruction =
            prompt::refinement_instruction(&request.prompt, &history, request.refinement_type);
        let include_text = request.include_text.unwrap_or(false);

        let mut parts = vec![Part::text(instruction)];
        if let Some(previous) = request.previous_image {
            parts.push(Part::inline_image("image/png", previous));
        }
        match self.client.image().generate(parts, include_text, None).await {
            Ok(output) => self.image_success(start, &output.parts, output.total_tokens),
            Err(e) => {
                log::error!("Image refinement failed: {}", e);
                self.image_failure(start, e.to_string())
            }
        }
    }

    /// High-fidelity text rendering from a design brief. Always requests a
    /// textual response alongside the image.
    pub async fn generate_text_image(&self, request: TextImageRequest) -> ImageResponse {
        let start = Instant::now();

        if request.text.trim().is_empty() {
            return self.image_failure(start, "No text provided");
        }

        let brief = prompt::text_design_instruction(
            &request.text,
            request.style,
            request.color_scheme.as_deref(),
            request.font_style.as_deref(),
            request.background.as_deref(),
        );

        log::info!(
            "Generating {} text image with model: {}",
            request.style.as_str(),
            self.image_model()
        );

        let parts = vec![Part::text(brief)];
        match self.client.image().generate(parts, true, None).await {
            Ok(output) => self.image_success(start, &output.parts, output.total_tokens),
            Err(e) => {
                log::error!("Text image generation failed: {}", e);
                self.image_failure(start, e.to_string())
            }
        }
    }

    /// Generation grounded in Google Search results.
    pub async fn generate_with_search(
        &self,
        prompt_text: &str,
        search_query: Option<&str>,
    ) -> ImageResponse {
        let start = Instant::now();

        if prompt_text.trim().is_empty() {
            return self.image_failure(start, "No prompt provided");
        }

        let instruction = match search_query {
            Some(query) => format!(
                "{}\n\nGround the image in current information about: {}",
                prompt_text, query
            ),
            None => prompt_text.to_string(),
        };

        let parts = vec![Part::text(instruction)];
        let tools = Some(vec![Tool::google_search()]);
        match self.client.image().generate(parts, true, tools).await {
            Ok(output) => self.image_success(start, &output.parts, output.total_tokens),
            Err(e) => {
                log::error!("Search-grounded generation failed: {}", e);
                self.image_failure(start, e.to_string())
            }
        }
    }

    /// Generation grounded in the content of a URL.
    pub async fn generate_from_url(&self, prompt_text: &str, url: &str) -> ImageResponse {
        let start = Instant::now();

        if prompt_text.trim().is_empty() {
            return self.image_failure(start, "No prompt provided");
        }
        if url.trim().is_empty() {
            return self.image_failure(start, "No URL provided");
        }

        let instruction = format!(
            "{}\n\nUse the content of this page as reference: {}",
            prompt_text, url
        );

        let parts = vec![Part::text(instruction)];
        let tools = Some(vec![Tool::url_context()]);
        match self.client.image().generate(parts, true, tools).await {
            Ok(output) => self.image_success(start, &output.parts, output.total_tokens),
            Err(e) => {
                log::error!("URL-grounded generation failed: {}", e);
                self.image_failure(start, e.to_string())
            }
        }
    }

    pub async fn check_text_health(&self) -> bool {
        self.client.check_text_health().await
    }

    pub async fn check_image_health(&self) -> bool {
        self.client.check_image_health().await
    }

    pub fn provider_info(&self) -> serde_json::Value {
        self.client.provider_info()
    }

    fn image_success(
        &self,
        start: Instant,
        parts: &[Part],
        total_tokens: Option<u32>,
    ) -> ImageResponse {
        let images = normalize::collect_images(parts);
        let text_response = normalize::collect_text(parts);
        let metadata = ResponseMetadata::image(
            self.image_model(),
            start.elapsed().as_millis() as u64,
            total_tokens,
            images.len(),
        );
        ImageResponse::ok(images, text_response, metadata)
    }

    fn image_failure(&self, start: Instant, error: impl Into<String>) -> ImageResponse {
        let metadata = ResponseMetadata::image(
            self.image_model(),
            start.elapsed().as_millis() as u64,
            None,
            0,
        );
        ImageResponse::fail(error, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeminiConfig;

    // Service without a configured credential: the missing-key failure path
    // exercises the envelope contract without any network traffic.
    fn unconfigured_service() -> AiService {
        AiService::new(GeminiConfig::new())
    }

    #[tokio::test]
    async fn test_enhance_failure_preserves_original_prompt() {
        let service = unconfigured_service();
        let response = service
            .enhance_prompt(EnhancePromptRequest {
                prompt: "a red sports car".to_string(),
                category: None,
                style: None,
            })
            .await;

        assert!(!response.success);
        assert_eq!(response.data.as_deref(), Some("a red sports car"));
        assert!(response
            .error
            .as_deref()
            .unwrap()
            .contains("API key not configured"));
        assert!(response.metadata.tokens_used.is_none());
        assert_eq!(response.metadata.provider, "google");
    }

    #[tokio::test]
    async fn test_suggest_failure_returns_empty_list() {
        let service = unconfigured_service();
        let response = service.suggest_prompts("landscape", 3).await;

        assert!(!response.success);
        assert_eq!(response.data, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_generate_image_rejects_empty_prompt() {
        let service = unconfigured_service();
        let response = service
            .generate_image(GenerateImageRequest {
                prompt: "   ".to_string(),
                style: None,
                aspect_ratio: None,
                quality: None,
                include_text: None,
            })
            .await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("No prompt provided"));
        assert!(response.images.is_empty());
        assert_eq!(response.metadata.images_generated, Some(0));
    }

    #[tokio::test]
    async fn test_edit_image_requires_base_image() {
        let service = unconfigured_service();
        let response = service
            .edit_image(EditImageRequest {
                prompt: "add a hat".to_string(),
                base_image: "".to_string(),
                operation: None,
                preserve_original: None,
                include_text: None,
            })
            .await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("No base image provided"));
    }

    #[tokio::test]
    async fn test_compose_requires_images() {
        let service = unconfigured_service();
        let response = service
            .compose_images(ComposeImagesRequest {
                prompt: "a collage".to_string(),
                images: Vec::new(),
                composition_type: None,
                include_text: None,
            })
            .await;

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("No image files provided"));
    }

    #[tokio::test]
    async fn test_missing_credential_surfaces_in_image_flow() {
        let service = unconfigured_service();
        let response = service
            .edit_image(EditImageRequest {
                prompt: "add a hat".to_string(),
                base_image: "aGVsbG8=".to_string(),
                operation: Some(crate::models::common::EditOperation::Add),
                preserve_original: Some(true),
                include_text: None,
            })
            .await;

        assert!(!response.success);
        assert!(response
            .error
            .as_deref()
            .unwrap()
            .contains("API key not configured"));
        assert_eq!(response.metadata.model, crate::config::IMAGE_MODEL);
    }
}
