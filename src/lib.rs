pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod normalize;
pub mod prompt;
#[cfg(feature = "server")]
pub mod server;
pub mod service;

pub use config::{Config, GeminiConfig, ServerConfig};
pub use error::{AiError, Result};
pub use gemini::{GeminiClient, ImageClient, TextClient};
pub use models::*;
pub use service::AiService;
