//! The AI gateway façade
//!
//! Every generative call the portfolio makes goes through [`Gateway`]. Each
//! operation comes in two flavours: a `try_*` method returning a typed
//! [`Outcome`] so callers can tell failure kinds apart, and a plain method that
//! collapses any failure into the fixed user-facing fallback and never fails.

use crate::ai::{
    BackendServices, GeminiChatClient, GeminiImageClient, GeminiVisionClient,
    ImageGenerationRequest, Part,
};
use crate::knowledge::KnowledgeBase;
use crate::models::Config;
use crate::{prompts, Error};
use base64::Engine as _;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error as ThisError;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

/// Shown once per call while no credential is configured.
pub const DEGRADED_WARNING: &str = "Gemini API Key is not configured. Features will be disabled.";
/// Text reply of chat and analysis in degraded mode.
pub const DEGRADED_REPLY: &str = "API Key not configured.";
pub const CHAT_FALLBACK: &str = "Sorry, I encountered an error while processing your request.";
pub const ANALYSIS_FALLBACK: &str =
    "Sorry, I had trouble analyzing that image. Please try another one.";

pub const IMAGE_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";
pub const HEADER_IMAGE_MIME_TYPE: &str = "image/jpeg";
pub const HEADER_ASPECT_RATIO: &str = "16:9";
pub const HEADER_IMAGE_COUNT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum GatewayFailure {
    #[error("{}", DEGRADED_WARNING)]
    MissingCredential,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Backend call failed: {0}")]
    Backend(String),

    /// The backend answered but produced nothing usable.
    #[error("Backend returned no result")]
    EmptyResult,
}

impl From<Error> for GatewayFailure {
    fn from(err: Error) -> Self {
        match err {
            Error::EmptyResponse => GatewayFailure::EmptyResult,
            other => GatewayFailure::Backend(other.to_string()),
        }
    }
}

pub type Outcome<T> = std::result::Result<T, GatewayFailure>;

#[derive(Debug, Clone, Copy)]
enum Operation {
    Chat,
    HeaderImage,
    SkillAnalysis,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Chat => "chat",
            Operation::HeaderImage => "header_image",
            Operation::SkillAnalysis => "skill_analysis",
        }
    }
}

/// Stateless gateway to the generative backend.
///
/// Holds only the read-only knowledge base and the backend handles, so one
/// instance can be shared behind an `Arc` and called concurrently.
pub struct Gateway {
    backend: Option<BackendServices>,
    knowledge: Arc<KnowledgeBase>,
}

impl Gateway {
    /// Build the gateway from configuration.
    ///
    /// A missing credential never fails construction; it yields a degraded
    /// gateway instead.
    pub fn from_config(config: &Config) -> Self {
        let knowledge = Arc::new(KnowledgeBase::default());

        let Some(api_key) = config.api_key.clone() else {
            error!("API key not found. Set API_KEY (or GEMINI_API_KEY) to enable AI features.");
            return Self::degraded(knowledge);
        };

        // Reuse one HTTP connection pool across the three clients.
        let http_client = reqwest::Client::new();

        info!(
            "Gateway models: chat={}, image={}, vision={}",
            config.chat_model, config.image_model, config.vision_model
        );

        let chat = GeminiChatClient::new_with_client(
            api_key.clone(),
            config.chat_model.clone(),
            http_client.clone(),
        )
        .with_base_url(config.base_url.clone())
        .with_timeout(config.request_timeout);

        let image_gen = GeminiImageClient::new_with_client(
            api_key.clone(),
            config.image_model.clone(),
            http_client.clone(),
        )
        .with_base_url(config.base_url.clone())
        .with_timeout(config.request_timeout);

        let vision = GeminiVisionClient::new_with_client(
            api_key,
            config.vision_model.clone(),
            http_client,
        )
        .with_base_url(config.base_url.clone())
        .with_timeout(config.request_timeout);

        Self::with_services(
            BackendServices {
                chat: Box::new(chat),
                image_gen: Box::new(image_gen),
                vision: Box::new(vision),
            },
            knowledge,
        )
    }

    /// Build a gateway over injected backend services.
    pub fn with_services(services: BackendServices, knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            backend: Some(services),
            knowledge,
        }
    }

    /// A gateway with no backend: every call returns its degraded value.
    pub fn degraded(knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            backend: None,
            knowledge,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.backend.is_none()
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    fn backend(&self) -> Outcome<&BackendServices> {
        self.backend
            .as_ref()
            .ok_or(GatewayFailure::MissingCredential)
    }

    fn report(op: Operation, failure: &GatewayFailure) {
        match failure {
            GatewayFailure::MissingCredential => warn!("{}", DEGRADED_WARNING),
            GatewayFailure::InvalidInput(reason) => {
                warn!("Rejected {} request: {}", op.name(), reason)
            }
            GatewayFailure::Backend(reason) => error!("Error in {}: {}", op.name(), reason),
            GatewayFailure::EmptyResult => info!("{} produced no result", op.name()),
        }
    }

    /// Run one call inside its own span and log how it failed, if it did.
    async fn traced<T, F>(op: Operation, call: F) -> Outcome<T>
    where
        F: Future<Output = Outcome<T>>,
    {
        let span = tracing::info_span!("gateway", op = op.name(), call_id = %Uuid::new_v4());
        async move {
            let outcome = call.await;
            if let Err(failure) = &outcome {
                Self::report(op, failure);
            }
            outcome
        }
        .instrument(span)
        .await
    }

    /// Answer a visitor's question from the knowledge base.
    pub async fn try_chat_respond(&self, query: &str) -> Outcome<String> {
        Self::traced(Operation::Chat, async {
            let backend = self.backend()?;
            if query.trim().is_empty() {
                return Err(GatewayFailure::InvalidInput("empty query".to_string()));
            }

            let prompt = prompts::chat(self.knowledge.as_text(), query);
            Ok(backend.chat.complete(&prompt).await?)
        })
        .await
    }

    /// Generate a header banner themed on `company_name`, as a JPEG data URI.
    pub async fn try_generate_image(&self, company_name: &str) -> Outcome<String> {
        Self::traced(Operation::HeaderImage, async {
            let backend = self.backend()?;
            if company_name.trim().is_empty() {
                return Err(GatewayFailure::InvalidInput("empty company name".to_string()));
            }

            let request = ImageGenerationRequest {
                prompt: prompts::header_image(company_name),
                number_of_images: HEADER_IMAGE_COUNT,
                output_mime_type: HEADER_IMAGE_MIME_TYPE.to_string(),
                aspect_ratio: HEADER_ASPECT_RATIO.to_string(),
            };

            let image = backend
                .image_gen
                .generate_images(&request)
                .await?
                .into_iter()
                .next()
                .ok_or(GatewayFailure::EmptyResult)?;

            let encoded = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
            Ok(format!("{}{}", IMAGE_DATA_URI_PREFIX, encoded))
        })
        .await
    }

    /// Relate an uploaded image to the portfolio projects.
    ///
    /// `image_base64` is the bare payload; any `data:` URI prefix must already
    /// be stripped.
    pub async fn try_analyze_image(&self, image_base64: &str, mime_type: &str) -> Outcome<String> {
        Self::traced(Operation::SkillAnalysis, async {
            let backend = self.backend()?;
            if image_base64.trim().is_empty() {
                return Err(GatewayFailure::InvalidInput("empty image payload".to_string()));
            }

            let parts = [
                Part::text(prompts::skill_analysis(self.knowledge.as_text())),
                Part::inline_data(mime_type, image_base64),
            ];
            Ok(backend.vision.analyze(&parts).await?)
        })
        .await
    }

    pub async fn chat_respond(&self, query: &str) -> String {
        match self.try_chat_respond(query).await {
            Ok(text) => text,
            Err(GatewayFailure::MissingCredential) => DEGRADED_REPLY.to_string(),
            Err(_) => CHAT_FALLBACK.to_string(),
        }
    }

    /// Returns `""` on any failure; the caller substitutes a placeholder.
    pub async fn generate_image(&self, company_name: &str) -> String {
        self.try_generate_image(company_name)
            .await
            .unwrap_or_default()
    }

    pub async fn analyze_image(&self, image_base64: &str, mime_type: &str) -> String {
        match self.try_analyze_image(image_base64, mime_type).await {
            Ok(text) => text,
            Err(GatewayFailure::MissingCredential) => DEGRADED_REPLY.to_string(),
            Err(_) => ANALYSIS_FALLBACK.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockChatClient, MockImageGenerationClient, MockVisionClient};
    use pretty_assertions::assert_eq;

    struct Mocks {
        chat: MockChatClient,
        image_gen: MockImageGenerationClient,
        vision: MockVisionClient,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                chat: MockChatClient::new(),
                image_gen: MockImageGenerationClient::new(),
                vision: MockVisionClient::new(),
            }
        }

        fn gateway(&self) -> Gateway {
            Gateway::with_services(
                BackendServices {
                    chat: Box::new(self.chat.clone()),
                    image_gen: Box::new(self.image_gen.clone()),
                    vision: Box::new(self.vision.clone()),
                },
                Arc::new(KnowledgeBase::default()),
            )
        }

        fn total_calls(&self) -> usize {
            self.chat.get_call_count()
                + self.image_gen.get_call_count()
                + self.vision.get_call_count()
        }
    }

    fn failing() -> Mocks {
        Mocks {
            chat: MockChatClient::new().with_error("connection reset".to_string()),
            image_gen: MockImageGenerationClient::new().with_error("quota".to_string()),
            vision: MockVisionClient::new().with_error("bad gateway".to_string()),
        }
    }

    #[test]
    fn test_from_config_without_key_is_degraded() {
        let gateway = Gateway::from_config(&Config::default());
        assert!(gateway.is_degraded());

        let config = Config {
            api_key: Some("key".to_string()),
            ..Config::default()
        };
        assert!(!Gateway::from_config(&config).is_degraded());
    }

    #[tokio::test]
    async fn test_degraded_mode_short_circuits_all_operations() {
        let gateway = Gateway::degraded(Arc::new(KnowledgeBase::default()));

        assert_eq!(gateway.chat_respond("What is Nexus AI?").await, DEGRADED_REPLY);
        assert_eq!(gateway.generate_image("Google").await, "");
        assert_eq!(gateway.analyze_image("iVBORw0KGgo=", "image/png").await, DEGRADED_REPLY);

        assert_eq!(
            gateway.try_chat_respond("hi").await,
            Err(GatewayFailure::MissingCredential)
        );
    }

    #[tokio::test]
    async fn test_backend_failures_become_fallbacks() {
        let mocks = failing();
        let gateway = mocks.gateway();

        assert_eq!(gateway.chat_respond("What is Nexus AI?").await, CHAT_FALLBACK);
        assert_eq!(gateway.generate_image("Google").await, "");
        assert_eq!(
            gateway.analyze_image("iVBORw0KGgo=", "image/png").await,
            ANALYSIS_FALLBACK
        );
        assert_eq!(mocks.total_calls(), 3);
    }

    #[tokio::test]
    async fn test_typed_outcomes_distinguish_failure_kinds() {
        let mocks = failing();
        let gateway = mocks.gateway();

        assert!(matches!(
            gateway.try_chat_respond("hi").await,
            Err(GatewayFailure::Backend(reason)) if reason.contains("connection reset")
        ));

        let empty = Mocks {
            image_gen: MockImageGenerationClient::new().with_empty_response(),
            ..Mocks::new()
        };
        assert_eq!(
            empty.gateway().try_generate_image("Google").await,
            Err(GatewayFailure::EmptyResult)
        );
    }

    #[tokio::test]
    async fn test_chat_prompt_carries_knowledge_and_query() {
        let mocks = Mocks {
            chat: MockChatClient::new()
                .with_response("Nexus AI is a RAG-based document analyzer.".to_string()),
            ..Mocks::new()
        };
        let gateway = mocks.gateway();

        let reply = gateway.chat_respond("What is Nexus AI?").await;
        assert_eq!(reply, "Nexus AI is a RAG-based document analyzer.");

        let prompts = mocks.chat.get_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(KnowledgeBase::default().as_text()));
        assert!(prompts[0].contains("What is Nexus AI?"));
    }

    #[tokio::test]
    async fn test_generate_image_returns_jpeg_data_uri() {
        let mocks = Mocks {
            image_gen: MockImageGenerationClient::new().with_image_response(vec![1, 2, 3]),
            ..Mocks::new()
        };
        let gateway = mocks.gateway();

        let uri = gateway.generate_image("Google").await;
        assert_eq!(uri, "data:image/jpeg;base64,AQID");

        let requests = mocks.image_gen.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].number_of_images, 1);
        assert_eq!(requests[0].output_mime_type, "image/jpeg");
        assert_eq!(requests[0].aspect_ratio, "16:9");
        assert!(requests[0].prompt.contains("\"Google\""));
    }

    #[tokio::test]
    async fn test_generate_image_zero_results_is_empty_string() {
        let mocks = Mocks {
            image_gen: MockImageGenerationClient::new().with_empty_response(),
            ..Mocks::new()
        };
        assert_eq!(mocks.gateway().generate_image("Google").await, "");
    }

    #[tokio::test]
    async fn test_analyze_image_sends_one_text_and_one_inline_part() {
        let mocks = Mocks {
            vision: MockVisionClient::new()
                .with_response("Interesting! This looks like Nexus AI.".to_string()),
            ..Mocks::new()
        };
        let gateway = mocks.gateway();

        let reply = gateway.analyze_image("iVBORw0KGgo=", "image/png").await;
        assert_eq!(reply, "Interesting! This looks like Nexus AI.");

        let requests = mocks.vision.get_requests();
        assert_eq!(requests.len(), 1);
        let parts = &requests[0];
        assert_eq!(parts.len(), 2);
        match &parts[0] {
            Part::Text { text } => {
                assert!(text.contains(KnowledgeBase::default().as_text()));
                assert!(text.contains("Interesting! This looks like..."));
            }
            other => panic!("expected text part first, got {:?}", other),
        }
        assert_eq!(parts[1], Part::inline_data("image/png", "iVBORw0KGgo="));
    }

    #[tokio::test]
    async fn test_blank_inputs_are_rejected_without_backend_calls() {
        let mocks = Mocks::new();
        let gateway = mocks.gateway();

        assert!(matches!(
            gateway.try_generate_image("   ").await,
            Err(GatewayFailure::InvalidInput(_))
        ));
        assert_eq!(gateway.generate_image("").await, "");
        assert_eq!(gateway.chat_respond(" \n").await, CHAT_FALLBACK);
        assert_eq!(gateway.analyze_image("", "image/png").await, ANALYSIS_FALLBACK);
        assert_eq!(mocks.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let mocks = Mocks::new();
        let gateway = mocks.gateway();

        assert_eq!(
            gateway.chat_respond("What is SwiftCart?").await,
            gateway.chat_respond("What is SwiftCart?").await
        );
        assert_eq!(
            gateway.generate_image("NASA").await,
            gateway.generate_image("NASA").await
        );
        assert_eq!(
            gateway.analyze_image("UklGRg==", "image/webp").await,
            gateway.analyze_image("UklGRg==", "image/webp").await
        );

        let prompts = mocks.chat.get_prompts();
        assert_eq!(prompts[0], prompts[1]);
    }
}
