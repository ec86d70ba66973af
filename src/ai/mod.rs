//! AI service integration for chat, image generation, and image analysis
//!
//! Each backend capability sits behind its own trait so the gateway can be
//! wired to Gemini in production and to the mocks in tests.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::types::{InlineData, Part};
pub use gemini::{GeminiChatClient, GeminiImageClient, GeminiVisionClient};
pub use mock::{MockChatClient, MockImageGenerationClient, MockVisionClient};

use crate::Result;
use async_trait::async_trait;

/// Configuration for a single image generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub number_of_images: u32,
    pub output_mime_type: String,
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Single-turn text generation.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// An empty vector is a successful call that produced nothing.
    async fn generate_images(&self, request: &ImageGenerationRequest)
        -> Result<Vec<GeneratedImage>>;
}

#[async_trait]
pub trait VisionService: Send + Sync {
    /// Multimodal generation over text and inline image parts, in order.
    async fn analyze(&self, parts: &[Part]) -> Result<String>;
}

/// Injectable capability bundle used to construct a [`crate::Gateway`].
pub struct BackendServices {
    pub chat: Box<dyn ChatService>,
    pub image_gen: Box<dyn ImageGenerationService>,
    pub vision: Box<dyn VisionService>,
}
