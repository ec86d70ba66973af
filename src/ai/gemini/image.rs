use super::client::GeminiHttpClient;
use super::types::{
    OutputOptions, PredictInstance, PredictParameters, PredictRequest, PredictResponse,
};
use crate::ai::{GeneratedImage, ImageGenerationRequest, ImageGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;

/// Imagen client speaking the Gemini API `predict` endpoint.
pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client),
        }
    }
}

super::impl_gemini_builders!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_images(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<Vec<GeneratedImage>> {
        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: PredictParameters {
                sample_count: request.number_of_images,
                aspect_ratio: request.aspect_ratio.clone(),
                output_options: OutputOptions {
                    mime_type: request.output_mime_type.clone(),
                },
            },
        };

        let response: PredictResponse = self.http.predict(&body).await?;

        let mut images = Vec::with_capacity(response.predictions.len());
        for prediction in response.predictions {
            let Some(encoded) = prediction.bytes_base64_encoded else {
                tracing::debug!("Skipping Imagen prediction without image bytes");
                continue;
            };

            let bytes = base64::engine::general_purpose::STANDARD
                .decode(&encoded)
                .map_err(|e| {
                    Error::AiProvider(format!("Failed to decode Imagen base64 image: {}", e))
                })?;

            images.push(GeneratedImage {
                bytes,
                mime_type: prediction
                    .mime_type
                    .unwrap_or_else(|| request.output_mime_type.clone()),
            });
        }

        tracing::debug!("Imagen returned {} image(s)", images.len());
        Ok(images)
    }
}
