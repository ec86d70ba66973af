use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, Part};
use crate::ai::VisionService;
use crate::{Error, Result};
use async_trait::async_trait;

pub struct GeminiVisionClient {
    http: GeminiHttpClient,
}

impl GeminiVisionClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client),
        }
    }
}

super::impl_gemini_builders!(GeminiVisionClient);

#[async_trait]
impl VisionService for GeminiVisionClient {
    async fn analyze(&self, parts: &[Part]) -> Result<String> {
        let inline_bytes: usize = parts
            .iter()
            .map(|p| match p {
                Part::InlineData { inline_data } => inline_data.data.len(),
                Part::Text { .. } => 0,
            })
            .sum();
        tracing::debug!(
            "Sending {} parts ({} base64 chars inline) to Gemini ({})",
            parts.len(),
            inline_bytes,
            self.http.model()
        );

        let request = GenerateContentRequest {
            contents: vec![Content::user(parts.to_vec())],
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        response.text().ok_or(Error::EmptyResponse)
    }
}
