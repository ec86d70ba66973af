macro_rules! impl_gemini_builders {
    ($client:ty) => {
        impl $client {
            /// Point the client at another Gemini-compatible host.
            pub fn with_base_url(mut self, base_url: String) -> Self {
                self.http = self.http.with_base_url(base_url);
                self
            }

            pub fn with_timeout(mut self, timeout: Option<std::time::Duration>) -> Self {
                self.http = self.http.with_timeout(timeout);
                self
            }
        }
    };
}
pub(crate) use impl_gemini_builders;

pub mod chat;
pub mod client;
pub mod image;
pub mod types;
pub mod vision;

pub use chat::GeminiChatClient;
pub use client::GeminiHttpClient;
pub use image::GeminiImageClient;
pub use vision::GeminiVisionClient;

#[cfg(test)]
pub(crate) mod test_support {
    use wiremock::matchers::{method, path_regex};
    use wiremock::MockBuilder;

    pub const GENERATE_CONTENT_PATH_REGEX: &str = r"^/v1beta/models/[^/]+:generateContent$";
    pub const PREDICT_PATH_REGEX: &str = r"^/v1beta/models/[^/]+:predict$";

    pub fn post_path_regex(regex: &str) -> MockBuilder {
        wiremock::Mock::given(method("POST")).and(path_regex(regex))
    }
}
