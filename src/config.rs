use std::env;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PORT: u16 = 3001;
pub const TEXT_MODEL: &str = "gemini-2.0-flash-exp";
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const PROVIDER_NAME: &str = "google";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: None,
            text_model: None,
            image_model: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_GENERATIVE_AI_API_KEY"))
            .ok();
        let base_url = env::var("GEMINI_BASE_URL").ok();
        let text_model = env::var("GEMINI_TEXT_MODEL").ok();
        let image_model = env::var("GEMINI_IMAGE_MODEL").ok();

        GeminiConfig {
            api_key,
            base_url,
            text_model,
            image_model,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = Some(model.into());
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: None,
            cors_origin: None,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());
        let cors_origin = env::var("CORS_ORIGIN").ok();

        ServerConfig { port, cors_origin }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = Some(origin.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini: GeminiConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            gemini: GeminiConfig::from_env(),
            server: ServerConfig::from_env(),
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_server(mut self, config: ServerConfig) -> Self {
        self.server = config;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let config = Config::new()
            .with_gemini(GeminiConfig::new().with_api_key("test-key"))
            .with_server(ServerConfig::new().with_port(3001));

        assert_eq!(config.gemini.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.server.port, Some(3001));
        assert!(config.gemini.base_url.is_none());
    }

    #[test]
    fn test_defaults_are_empty() {
        let config = GeminiConfig::default();
        assert!(config.api_key.is_none());
        assert!(config.text_model.is_none());
    }
}
