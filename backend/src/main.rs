mod llm;
mod routes;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use llm::{GeminiClient, ImageExtractor};
use routes::configure_routes;
use std::env;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let frontend_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        format!("{}/../frontend/dist", manifest_dir)
    } else {
        "/usr/src/app/frontend/dist".to_string()
    };

    // The credential is read here once and handed to the client; nothing
    // else touches the process environment, and the key itself is not logged.
    let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            "GEMINI_API_KEY is not set; the extraction client cannot start without it",
        )
    })?;

    let extractor: Arc<dyn ImageExtractor> = match env::var("GEMINI_MODEL") {
        Ok(model) => {
            log::info!("Using Gemini model override: {}", model);
            Arc::new(GeminiClient::new(api_key, model))
        }
        Err(_) => Arc::new(GeminiClient::with_default_model(api_key)),
    };
    let extractor = web::Data::from(extractor);

    let port = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let bind_address = format!("0.0.0.0:{}", port);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(extractor.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
