//! Generative-text backend boundary.

mod gemini;

pub use gemini::{DEFAULT_GEMINI_MODEL, GeminiClient};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("generative backend is not configured")]
    Unavailable,

    #[error("generative backend request failed: {0}")]
    Http(String),

    #[error("malformed generative backend response: {0}")]
    Malformed(String),
}

/// One-shot text synthesis.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}
