pub mod routes;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use crate::config::{Config, DEFAULT_PORT};
use crate::service::AiService;

/// JSON body limit: base64-encoded source images make bodies large.
const JSON_PAYLOAD_LIMIT: usize = 25 * 1024 * 1024;

/// Binds the HTTP server and runs it to completion.
pub async fn run(config: Config) -> std::io::Result<()> {
    let port = config.server.port.unwrap_or(DEFAULT_PORT);
    let cors_origin = config
        .server
        .cors_origin
        .clone()
        .unwrap_or_else(|| "http://localhost:3000".to_string());

    let service = web::Data::new(AiService::new(config.gemini));

    log::info!("🌐 HTTP server listening on http://0.0.0.0:{}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(cors)
            .app_data(service.clone())
            .app_data(web::JsonConfig::default().limit(JSON_PAYLOAD_LIMIT))
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
