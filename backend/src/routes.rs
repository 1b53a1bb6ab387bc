use actix_files::Files;
use actix_web::{HttpResponse, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use log::warn;
use shared::{ErrorResponse, ExtractRequest, ExtractResponse};

use crate::llm::ImageExtractor;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    cfg.service(web::resource("/api/extract").route(web::post().to(handle_extract)))
        .service(Files::new("/", frontend_dir).index_file("index.html"));
}

/// One extraction per request. Input errors are rejected here before any
/// outbound call; remote failures surface only the generic message carried
/// by [`crate::llm::ExtractionFailed`].
async fn handle_extract(
    extractor: web::Data<dyn ImageExtractor>,
    request: web::Json<ExtractRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    if request.image_data.is_empty() {
        return bad_request("No image provided.");
    }
    if !request.mime_type.starts_with("image/") {
        return bad_request(&format!("Unsupported media type: {}", request.mime_type));
    }
    if BASE64.decode(&request.image_data).is_err() {
        return bad_request("Image data is not valid base64.");
    }

    let instruction = request.template.instruction(request.custom_prompt.as_deref());

    match extractor
        .extract_json(&request.image_data, &request.mime_type, &instruction)
        .await
    {
        Ok(json) => HttpResponse::Ok().json(ExtractResponse {
            json,
            template: request.template,
            timestamp: Utc::now(),
        }),
        Err(e) => HttpResponse::InternalServerError().json(ErrorResponse {
            error: e.to_string(),
        }),
    }
}

fn bad_request(message: &str) -> HttpResponse {
    warn!("Rejected extract request: {}", message);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{EXTRACTION_FAILED, FakeExtractor};
    use actix_web::{App, test};
    use shared::ExtractionTemplate;
    use std::sync::Arc;

    fn png_request() -> ExtractRequest {
        ExtractRequest {
            image_data: BASE64.encode(b"not really a png"),
            mime_type: "image/png".to_string(),
            template: ExtractionTemplate::General,
            custom_prompt: None,
        }
    }

    async fn call_extract(
        fake: &Arc<FakeExtractor>,
        body: &ExtractRequest,
    ) -> (u16, serde_json::Value) {
        let data: web::Data<dyn ImageExtractor> =
            web::Data::from(Arc::clone(fake) as Arc<dyn ImageExtractor>);
        let app = test::init_service(
            App::new()
                .app_data(data)
                .service(web::resource("/api/extract").route(web::post().to(handle_extract))),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/api/extract")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;
        let status = response.status().as_u16();
        let body = test::read_body(response).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[actix_web::test]
    async fn success_returns_trimmed_model_text() {
        let fake = Arc::new(FakeExtractor::succeeding("  {\"a\":1}\n"));
        let (status, body) = call_extract(&fake, &png_request()).await;

        assert_eq!(status, 200);
        assert_eq!(body["json"], r#"{"a":1}"#);
        assert_eq!(body["template"], "General");
        assert!(body["timestamp"].is_string());
        assert_eq!(fake.call_count(), 1);
    }

    #[actix_web::test]
    async fn remote_failure_surfaces_only_the_generic_message() {
        let fake = Arc::new(FakeExtractor::failing());
        let (status, body) = call_extract(&fake, &png_request()).await;

        assert_eq!(status, 500);
        assert_eq!(body["error"], EXTRACTION_FAILED);
        assert!(!body["error"].as_str().unwrap().contains("network down"));
    }

    #[actix_web::test]
    async fn missing_image_is_rejected_without_an_outbound_call() {
        let fake = Arc::new(FakeExtractor::succeeding("{}"));
        let mut body = png_request();
        body.image_data = String::new();

        let (status, response) = call_extract(&fake, &body).await;
        assert_eq!(status, 400);
        assert_eq!(response["error"], "No image provided.");
        assert_eq!(fake.call_count(), 0);
    }

    #[actix_web::test]
    async fn non_image_media_type_is_rejected_locally() {
        let fake = Arc::new(FakeExtractor::succeeding("{}"));
        let mut body = png_request();
        body.mime_type = "application/pdf".to_string();

        let (status, _) = call_extract(&fake, &body).await;
        assert_eq!(status, 400);
        assert_eq!(fake.call_count(), 0);
    }

    #[actix_web::test]
    async fn undecodable_payload_is_rejected_locally() {
        let fake = Arc::new(FakeExtractor::succeeding("{}"));
        let mut body = png_request();
        body.image_data = "!!! definitely not base64 !!!".to_string();

        let (status, _) = call_extract(&fake, &body).await;
        assert_eq!(status, 400);
        assert_eq!(fake.call_count(), 0);
    }

    #[actix_web::test]
    async fn custom_prompt_reaches_the_extractor_verbatim() {
        let fake = Arc::new(FakeExtractor::succeeding("{}"));
        let mut body = png_request();
        body.template = ExtractionTemplate::Custom;
        body.custom_prompt = Some("Count the llamas.".to_string());

        let (status, _) = call_extract(&fake, &body).await;
        assert_eq!(status, 200);
        assert_eq!(fake.last_instruction().as_deref(), Some("Count the llamas."));
    }
}
