use fusionpixels::config::Config;
use fusionpixels::logger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = logger::init_with_config(
        logger::LoggerConfig::development().with_level(logger::LogLevel::Debug),
    ) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let config = Config::from_env();

    if config.gemini.api_key.is_none() {
        log::warn!("⚠️  GEMINI_API_KEY is not set; every provider call will fail until it is");
    }

    logger::log_startup_info(
        "FusionPixels API",
        env!("CARGO_PKG_VERSION"),
        config
            .server
            .port
            .unwrap_or(fusionpixels::config::DEFAULT_PORT),
    );
    logger::log_config_info(&config);

    fusionpixels::server::run(config).await
}
