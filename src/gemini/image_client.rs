use crate::{
    error::{AiError, Result},
    models::gemini::{
        ApiErrorResponse, Content, GenerateContentRequest, GenerateContentResponse,
        GenerationConfig, Part, Tool,
    },
};

/// Output of one image-model call: the candidate's parts in provider order
/// (inline images plus any accompanying text) and the usage counter.
#[derive(Debug, Clone)]
pub struct ImageOutput {
    pub parts: Vec<Part>,
    pub total_tokens: Option<u32>,
}

#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl ImageClient {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        api_key: Option<String>,
        model: String,
    ) -> Self {
        Self {
            http,
            base_url,
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Single generateContent call against the image model. `parts` is the
    /// ordered instruction: text first, then any inline source images.
    /// `include_text` requests a textual response alongside the image;
    /// `tools` switches on grounding (search, URL context).
    pub async fn generate(
        &self,
        parts: Vec<Part>,
        include_text: bool,
        tools: Option<Vec<Tool>>,
    ) -> Result<ImageOutput> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::ConfigError("Gemini API key not configured".into()))?;

        let modalities = if include_text {
            vec!["TEXT".to_string(), "IMAGE".to_string()]
        } else {
            vec!["IMAGE".to_string()]
        };

        let request = GenerateContentRequest {
            contents: vec![Content::user(parts)],
            generation_config: Some(GenerationConfig {
                max_output_tokens: None,
                temperature: None,
                response_modalities: Some(modalities),
            }),
            tools,
        };

        log::debug!("Invoking image model: {}", self.model);

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::RequestError(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|parsed| parsed.error.message)
                .unwrap_or(body);
            return Err(AiError::ProviderError(format!(
                "Gemini error ({}): {}",
                status.as_u16(),
                message
            )));
        }

        let decoded: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AiError::ResponseError(e.to_string()))?;

        let parts = decoded.parts().to_vec();
        if parts.is_empty() {
            return Err(AiError::ResponseError(
                "Model returned no candidates".into(),
            ));
        }

        Ok(ImageOutput {
            parts,
            total_tokens: decoded.total_tokens(),
        })
    }
}
