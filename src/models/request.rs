use serde::Deserialize;

use super::common::{
    AspectRatio, CompositionType, EditOperation, ImageQuality, ImageStyle, RefinementType,
    TextStyle,
};

fn default_count() -> u8 {
    3
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancePromptRequest {
    pub prompt: String,
    pub category: Option<String>,
    pub style: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestPromptsRequest {
    pub category: String,
    #[serde(default = "default_count")]
    pub count: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePromptRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    pub prompt: String,
    pub style: Option<ImageStyle>,
    pub aspect_ratio: Option<AspectRatio>,
    pub quality: Option<ImageQuality>,
    pub include_text: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditImageRequest {
    pub prompt: String,
    /// Base64-encoded source image.
    pub base_image: String,
    pub operation: Option<EditOperation>,
    pub preserve_original: Option<bool>,
    pub include_text: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeImagesRequest {
    pub prompt: String,
    /// Base64-encoded source images, in composition order.
    pub images: Vec<String>,
    pub composition_type: Option<CompositionType>,
    pub include_text: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineImageRequest {
    pub prompt: String,
    pub previous_image: Option<String>,
    pub conversation_history: Option<Vec<String>>,
    pub refinement_type: Option<RefinementType>,
    pub include_text: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextImageRequest {
    pub text: String,
    pub style: TextStyle,
    pub color_scheme: Option<String>,
    pub font_style: Option<String>,
    pub background: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchGroundedRequest {
    pub prompt: String,
    pub search_query: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlGroundedRequest {
    pub prompt: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_count_defaults() {
        let req: SuggestPromptsRequest =
            serde_json::from_str(r#"{"category": "landscape"}"#).unwrap();
        assert_eq!(req.count, 3);
    }

    #[test]
    fn test_camel_case_fields() {
        let req: EditImageRequest = serde_json::from_str(
            r#"{"prompt": "add a hat", "baseImage": "aGk=", "preserveOriginal": true}"#,
        )
        .unwrap();
        assert_eq!(req.base_image, "aGk=");
        assert_eq!(req.preserve_original, Some(true));
        assert!(req.operation.is_none());
    }

    #[test]
    fn test_unknown_operation_is_rejected() {
        let result = serde_json::from_str::<EditImageRequest>(
            r#"{"prompt": "x", "baseImage": "aGk=", "operation": "rotate"}"#,
        );
        assert!(result.is_err());
    }
}
