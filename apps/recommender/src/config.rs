use anyhow::{Context, Result};

/// Service configuration loaded from environment variables.
///
/// Model identifier, output budget, and sampling temperature are fixed here
/// at construction time and are not overridable per call.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub model_name: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            model_name: std::env::var("MODEL_NAME")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            max_output_tokens: std::env::var("MAX_TOKENS")
                .unwrap_or_else(|_| "1024".to_string())
                .parse::<u32>()
                .context("MAX_TOKENS must be a positive integer")?,
            temperature: std::env::var("TEMPERATURE")
                .unwrap_or_else(|_| "0.7".to_string())
                .parse::<f32>()
                .context("TEMPERATURE must be a number")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
