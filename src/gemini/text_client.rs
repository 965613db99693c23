use crate::{
    error::{AiError, Result},
    models::gemini::{
        ApiErrorResponse, Content, GenerateContentRequest, GenerateContentResponse,
        GenerationConfig, Part,
    },
};

/// Output of one text-model call.
#[derive(Debug, Clone)]
pub struct TextOutput {
    pub text: String,
    pub total_tokens: Option<u32>,
}

#[derive(Clone)]
pub struct TextClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl TextClient {
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

    /// Single generateContent call against the text model. One attempt, no
    /// retries; the returned text is trimmed.
    pub async fn generate(
        &self,
        instruction: &str,
        max_output_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<TextOutput> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AiError::ConfigError("Gemini API key not configured".into()))?;

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(instruction)])],
            generation_config: Some(GenerationConfig {
                max_output_tokens,
                temperature,
                response_modalities: None,
            }),
            tools: None,
        };

        log::debug!("Invoking text model: {}", self.model);

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

        let text = decoded.text();
        if text.trim().is_empty() {
            return Err(AiError::ResponseError(
                "Model returned no text candidates".into(),
            ));
        }

        Ok(TextOutput {
            text: text.trim().to_string(),
            total_tokens: decoded.total_tokens(),
        })
    }
}
