use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use futures_util::TryStreamExt as _;
use serde_json::{json, Value};

use crate::models::request::{
    AnalyzePromptRequest, ComposeImagesRequest, EditImageRequest, EnhancePromptRequest,
    GenerateImageRequest, RefineImageRequest, SearchGroundedRequest, SuggestPromptsRequest,
    TextImageRequest, UrlGroundedRequest,
};
use crate::models::response::{ImageResponse, ResponseMetadata};
use crate::service::AiService;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/ai")
            .route("/enhance-prompt", web::post().to(enhance_prompt))
            .route("/suggest-prompts", web::post().to(suggest_prompts))
            .route("/analyze-prompt", web::post().to(analyze_prompt))
            .route("/generate-image", web::post().to(generate_image))
            .route("/edit-image", web::post().to(edit_image))
            .route("/compose-images", web::post().to(compose_images))
            .route("/refine-image", web::post().to(refine_image))
            .route("/generate-text-image", web::post().to(generate_text_image))
            .route("/generate-with-search", web::post().to(generate_with_search))
            .route("/generate-from-url", web::post().to(generate_from_url))
            .route("/upload-and-edit", web::post().to(upload_and_edit))
            .route("/upload-and-compose", web::post().to(upload_and_compose))
            .route("/health", web::get().to(health))
            .route("/info", web::get().to(info))
            .route("/capabilities", web::get().to(capabilities)),
    );
}

fn with_extras<T: serde::Serialize>(result: &T, extras: Vec<(&str, Value)>) -> Value {
    let mut body = serde_json::to_value(result).unwrap_or_else(|_| json!({}));
    for (key, value) in extras {
        body[key] = value;
    }
    body
}

async fn enhance_prompt(
    service: web::Data<AiService>,
    body: web::Json<EnhancePromptRequest>,
) -> impl Responder {
    let original = body.prompt.clone();
    let result = service.enhance_prompt(body.into_inner()).await;
    let model = result.metadata.model.clone();
    HttpResponse::Ok().json(with_extras(
        &result,
        vec![("original", json!(original)), ("model", json!(model))],
    ))
}

async fn suggest_prompts(
    service: web::Data<AiService>,
    body: web::Json<SuggestPromptsRequest>,
) -> impl Responder {
    let result = service.suggest_prompts(&body.category, body.count).await;
    HttpResponse::Ok().json(result)
}

async fn analyze_prompt(
    service: web::Data<AiService>,
    body: web::Json<AnalyzePromptRequest>,
) -> impl Responder {
    let result = service.analyze_prompt(&body.prompt).await;
    HttpResponse::Ok().json(result)
}

async fn generate_image(
    service: web::Data<AiService>,
    body: web::Json<GenerateImageRequest>,
) -> impl Responder {
    let result = service.generate_image(body.into_inner()).await;
    HttpResponse::Ok().json(with_extras(
        &result,
        vec![(
            "note",
            json!("Generated with Gemini 2.5 Flash Image Preview"),
        )],
    ))
}

async fn edit_image(
    service: web::Data<AiService>,
    body: web::Json<EditImageRequest>,
) -> impl Responder {
    let operation = body
        .operation
        .map(|op| op.as_str())
        .unwrap_or("modify")
        .to_string();
    let result = service.edit_image(body.into_inner()).await;
    HttpResponse::Ok().json(with_extras(
        &result,
        vec![
            ("operation", json!(operation)),
            ("note", json!("Image edited with native image capabilities")),
        ],
    ))
}

async fn compose_images(
    service: web::Data<AiService>,
    body: web::Json<ComposeImagesRequest>,
) -> impl Responder {
    let composition_type = body
        .composition_type
        .map(|c| c.as_str())
        .unwrap_or("merge")
        .to_string();
    let input_image_count = body.images.len();
    let result = service.compose_images(body.into_inner()).await;
    HttpResponse::Ok().json(with_extras(
        &result,
        vec![
            ("compositionType", json!(composition_type)),
            ("inputImageCount", json!(input_image_count)),
            ("note", json!("Images composed with multi-image capabilities")),
        ],
    ))
}

async fn refine_image(
    service: web::Data<AiService>,
    body: web::Json<RefineImageRequest>,
) -> impl Responder {
    let refinement_type = body
        .refinement_type
        .map(|r| r.as_str())
        .unwrap_or("adjust")
        .to_string();
    let conversation_turn = body
        .conversation_history
        .as_ref()
        .map(|h| h.len())
        .unwrap_or(0)
        + 1;
    let result = service.refine_image(body.into_inner()).await;
    HttpResponse::Ok().json(with_extras(
        &result,
        vec![
            ("refinementType", json!(refinement_type)),
            ("conversationTurn", json!(conversation_turn)),
            ("note", json!("Image refined iteratively")),
        ],
    ))
}

async fn generate_text_image(
    service: web::Data<AiService>,
    body: web::Json<TextImageRequest>,
) -> impl Responder {
    let text_content = body.text.clone();
    let design_style = body.style.as_str().to_string();
    let result = service.generate_text_image(body.into_inner()).await;
    HttpResponse::Ok().json(with_extras(
        &result,
        vec![
            ("textContent", json!(text_content)),
            ("designStyle", json!(design_style)),
            ("note", json!("High-fidelity text image with exact typography")),
        ],
    ))
}

async fn generate_with_search(
    service: web::Data<AiService>,
    body: web::Json<SearchGroundedRequest>,
) -> impl Responder {
    let search_query = body.search_query.clone();
    let result = service
        .generate_with_search(&body.prompt, search_query.as_deref())
        .await;
    HttpResponse::Ok().json(with_extras(
        &result,
        vec![
            ("searchQuery", json!(search_query)),
            ("note", json!("Generated with Google Search grounding")),
        ],
    ))
}

async fn generate_from_url(
    service: web::Data<AiService>,
    body: web::Json<UrlGroundedRequest>,
) -> impl Responder {
    let source_url = body.url.clone();
    let result = service.generate_from_url(&body.prompt, &source_url).await;
    HttpResponse::Ok().json(with_extras(
        &result,
        vec![
            ("sourceUrl", json!(source_url)),
            ("note", json!("Generated from URL context")),
        ],
    ))
}

struct UploadedFile {
    field: String,
    original_name: String,
    mime_type: String,
    data: Vec<u8>,
}

impl UploadedFile {
    fn descriptor(&self) -> Value {
        json!({
            "originalName": self.original_name,
            "size": self.data.len(),
            "mimeType": self.mime_type,
        })
    }
}

/// Drains a multipart payload into plain text fields and uploaded files.
/// A part with a filename is a file; everything else is a text field.
async fn read_multipart(mut payload: Multipart) -> (HashMap<String, String>, Vec<UploadedFile>) {
    let mut fields = HashMap::new();
    let mut files = Vec::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let name = field.name().to_string();
        let file_name = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);
        let mime_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let mut data = Vec::new();
        while let Ok(Some(chunk)) = field.try_next().await {
            data.extend_from_slice(&chunk);
        }

        match file_name {
            Some(original_name) => files.push(UploadedFile {
                field: name,
                original_name,
                mime_type,
                data,
            }),
            None => {
                fields.insert(name, String::from_utf8_lossy(&data).into_owned());
            }
        }
    }

    (fields, files)
}

fn upload_failure(service: &AiService, error: &str) -> ImageResponse {
    ImageResponse::fail(
        error,
        ResponseMetadata::image(service.image_model(), 0, None, 0),
    )
}

fn parse_enum_field<T: serde::de::DeserializeOwned>(fields: &HashMap<String, String>, key: &str) -> Option<T> {
    fields
        .get(key)
        .and_then(|value| serde_json::from_value(json!(value)).ok())
}

async fn upload_and_edit(service: web::Data<AiService>, payload: Multipart) -> impl Responder {
    let (fields, files) = read_multipart(payload).await;

    let file = match files.iter().find(|f| f.field == "image") {
        Some(file) => file,
        None => {
            return HttpResponse::Ok().json(upload_failure(&service, "No image file provided"));
        }
    };

    let request = EditImageRequest {
        prompt: fields.get("prompt").cloned().unwrap_or_default(),
        base_image: BASE64.encode(&file.data),
        operation: parse_enum_field(&fields, "operation"),
        preserve_original: None,
        include_text: fields.get("includeText").map(|v| v == "true"),
    };

    let result = service.edit_image(request).await;
    HttpResponse::Ok().json(with_extras(
        &result,
        vec![
            ("uploadedFile", file.descriptor()),
            ("note", json!("Image uploaded and edited")),
        ],
    ))
}

async fn upload_and_compose(service: web::Data<AiService>, payload: Multipart) -> impl Responder {
    let (fields, files) = read_multipart(payload).await;

    // Mirror the original's interceptor cap of 10 files per request.
    let images: Vec<&UploadedFile> = files
        .iter()
        .filter(|f| f.field == "images")
        .take(10)
        .collect();
    if images.is_empty() {
        return HttpResponse::Ok().json(upload_failure(&service, "No image files provided"));
    }

    let request = ComposeImagesRequest {
        prompt: fields.get("prompt").cloned().unwrap_or_default(),
        images: images.iter().map(|f| BASE64.encode(&f.data)).collect(),
        composition_type: parse_enum_field(&fields, "compositionType"),
        include_text: fields.get("includeText").map(|v| v == "true"),
    };

    let result = service.compose_images(request).await;
    let descriptors: Vec<Value> = images.iter().map(|f| f.descriptor()).collect();
    HttpResponse::Ok().json(with_extras(
        &result,
        vec![
            ("uploadedFiles", json!(descriptors)),
            ("note", json!("Images uploaded and composed")),
        ],
    ))
}

async fn health(service: web::Data<AiService>) -> impl Responder {
    let text_health = service.check_text_health().await;
    let image_health = service.check_image_health().await;

    HttpResponse::Ok().json(json!({
        "textGeneration": text_health,
        "imageGeneration": image_health,
        "overall": text_health && image_health,
        "providerInfo": service.provider_info(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn info(service: web::Data<AiService>) -> impl Responder {
    HttpResponse::Ok().json(service.provider_info())
}

async fn capabilities() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "textGeneration": {
            "promptEnhancement": true,
            "creativeSuggestions": true,
            "promptAnalysis": true,
            "multiLanguage": true,
            "structuredOutput": true,
        },
        "imageGeneration": {
            "textToImage": true,
            "imageEditing": true,
            "multiImageComposition": true,
            "iterativeRefinement": true,
            "highFidelityText": true,
            "styleTransfer": true,
            "inpainting": true,
            "productMockups": true,
            "logoDesign": true,
            "searchGrounding": true,
            "urlContext": true,
        },
        "supportedStyles": ["photorealistic", "artistic", "minimalist", "commercial", "logo", "cartoon"],
        "supportedOperations": ["add", "remove", "modify", "style_transfer", "inpaint"],
        "supportedCompositions": ["merge", "style_transfer", "product_mockup", "collage"],
        "supportedTextStyles": ["logo", "poster", "banner", "business_card", "social_media"],
        "advancedFeatures": [
            "google_search_grounding",
            "url_context",
            "file_uploads",
            "conversation_history",
        ],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    use crate::config::GeminiConfig;

    fn test_app_service() -> web::Data<AiService> {
        web::Data::new(AiService::new(GeminiConfig::new()))
    }

    #[actix_web::test]
    async fn test_enhance_prompt_returns_200_with_failure_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(test_app_service())
                .configure(configure),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/ai/enhance-prompt")
            .set_json(json!({"prompt": "a red car"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        // No credential configured: still HTTP 200, failure in-band, and the
        // caller's prompt comes back both as fallback data and as `original`.
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], "a red car");
        assert_eq!(body["original"], "a red car");
        assert!(body["metadata"]["processingTime"].is_number());
    }

    #[actix_web::test]
    async fn test_unknown_style_is_rejected_with_400() {
        let app = test::init_service(
            App::new()
                .app_data(test_app_service())
                .configure(configure),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/ai/generate-image")
            .set_json(json!({"prompt": "a red car", "style": "sketch"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_capabilities_lists_supported_styles() {
        let app = test::init_service(
            App::new()
                .app_data(test_app_service())
                .configure(configure),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/api/ai/capabilities")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["supportedStyles"].as_array().unwrap().len(), 6);
        assert_eq!(body["imageGeneration"]["textToImage"], true);
    }

    #[actix_web::test]
    async fn test_edit_image_echoes_operation_extra() {
        let app = test::init_service(
            App::new()
                .app_data(test_app_service())
                .configure(configure),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/ai/edit-image")
            .set_json(json!({"prompt": "add a hat", "baseImage": "aGVsbG8=", "operation": "add"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["operation"], "add");
        assert_eq!(body["success"], false);
        assert!(body["images"].as_array().unwrap().is_empty());
    }
}
