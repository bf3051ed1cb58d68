use anyhow::Result;
use async_trait::async_trait;

use crate::types::ImagePart;

/// A hosted vision-capable text-generation model.
///
/// Implementations send the prompt and the image in one request and return
/// the model's text output unmodified.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Model identifier (e.g., "gemini-1.5-flash").
    fn name(&self) -> &str;

    /// Generate text for the given prompt and image.
    async fn generate(&self, prompt: &str, image: &ImagePart) -> Result<String>;
}
