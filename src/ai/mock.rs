use super::{
    ChatService, GeneratedImage, ImageGenerationRequest, ImageGenerationService, Part,
    VisionService,
};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted replies are replayed in order and cycle once exhausted.
type Script<T> = Arc<Mutex<Vec<std::result::Result<T, String>>>>;

fn next_reply<T: Clone>(script: &Script<T>, call: usize) -> Option<Result<T>> {
    let replies = script.lock().unwrap();
    if replies.is_empty() {
        return None;
    }
    let reply = replies[(call - 1) % replies.len()].clone();
    Some(reply.map_err(Error::AiProvider))
}

/// A 1x1 JPEG header, enough for MIME sniffing.
pub const MOCK_JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

#[derive(Clone)]
pub struct MockChatClient {
    responses: Script<String>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_error(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let call = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.prompts.lock().unwrap().push(prompt.to_string());

        next_reply(&self.responses, call)
            .unwrap_or_else(|| Ok(format!("Mock reply ({} chars of prompt)", prompt.len())))
    }
}

#[derive(Clone)]
pub struct MockImageGenerationClient {
    responses: Script<Vec<GeneratedImage>>,
    requests: Arc<Mutex<Vec<ImageGenerationRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image_response(self, bytes: Vec<u8>) -> Self {
        self.responses.lock().unwrap().push(Ok(vec![GeneratedImage {
            bytes,
            mime_type: "image/jpeg".to_string(),
        }]));
        self
    }

    /// A successful call that produced no images.
    pub fn with_empty_response(self) -> Self {
        self.responses.lock().unwrap().push(Ok(Vec::new()));
        self
    }

    pub fn with_error(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_requests(&self) -> Vec<ImageGenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_images(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<Vec<GeneratedImage>> {
        let call = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.requests.lock().unwrap().push(request.clone());

        next_reply(&self.responses, call).unwrap_or_else(|| {
            Ok(vec![GeneratedImage {
                bytes: MOCK_JPEG.to_vec(),
                mime_type: "image/jpeg".to_string(),
            }])
        })
    }
}

#[derive(Clone)]
pub struct MockVisionClient {
    responses: Script<String>,
    requests: Arc<Mutex<Vec<Vec<Part>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockVisionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_error(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_requests(&self) -> Vec<Vec<Part>> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockVisionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionService for MockVisionClient {
    async fn analyze(&self, parts: &[Part]) -> Result<String> {
        let call = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.requests.lock().unwrap().push(parts.to_vec());

        next_reply(&self.responses, call)
            .unwrap_or_else(|| Ok("Interesting! This looks like a mock analysis.".to_string()))
    }
}
