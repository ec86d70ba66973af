use crate::ai::mime::{detect_image_mime, mime_from_extension};
use crate::{Error, Gateway, Result};
use base64::Engine as _;
use std::path::Path;

pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Check an upload against the scanner's limits before it reaches the gateway.
pub fn validate_upload(bytes: &[u8], mime_type: &str) -> Result<()> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(Error::Upload("File is too large. Max size is 4MB.".to_string()));
    }
    if bytes.is_empty() {
        return Err(Error::Upload("File is empty.".to_string()));
    }
    if !ACCEPTED_MIME_TYPES.contains(&mime_type) {
        return Err(Error::Upload(format!(
            "Unsupported file type '{}'. Use PNG, JPG or WEBP.",
            mime_type
        )));
    }
    Ok(())
}

/// Drop a `data:<mime>;base64,` prefix, leaving bare payloads untouched.
pub fn strip_data_uri(value: &str) -> &str {
    match value.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, payload)| payload),
        None => value,
    }
}

fn data_uri_mime(value: &str) -> Option<&str> {
    let rest = value.strip_prefix("data:")?;
    let (meta, _) = rest.split_once(',')?;
    meta.strip_suffix(";base64")
}

/// State of the proof-of-skill scanner: the last upload and its analysis.
#[derive(Debug, Default, Clone)]
pub struct SkillScanner {
    file_name: Option<String>,
    analysis: Option<String>,
    error: Option<String>,
}

impl SkillScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    /// Message for the last rejected upload, cleared by the next accepted one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn reject(&mut self, err: Error) -> Error {
        self.error = Some(match &err {
            Error::Upload(message) => message.clone(),
            other => other.to_string(),
        });
        err
    }

    /// Validate raw upload bytes and have the gateway analyze them.
    pub async fn analyze_bytes(
        &mut self,
        gateway: &Gateway,
        file_name: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<&str> {
        if let Err(err) = validate_upload(bytes, mime_type) {
            return Err(self.reject(err));
        }
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(self.submit(gateway, file_name, &payload, mime_type).await)
    }

    /// Analyze an upload given as a `data:` URI, as a file reader produces.
    pub async fn analyze_data_uri(
        &mut self,
        gateway: &Gateway,
        file_name: &str,
        data_uri: &str,
    ) -> Result<&str> {
        let Some(mime_type) = data_uri_mime(data_uri) else {
            return Err(self.reject(Error::Upload("Not a base64 data URI.".to_string())));
        };
        let payload = strip_data_uri(data_uri);

        let bytes = match base64::engine::general_purpose::STANDARD.decode(payload) {
            Ok(bytes) => bytes,
            Err(e) => {
                return Err(self.reject(Error::Upload(format!("Invalid base64 payload: {}", e))))
            }
        };
        if let Err(err) = validate_upload(&bytes, mime_type) {
            return Err(self.reject(err));
        }

        Ok(self.submit(gateway, file_name, payload, mime_type).await)
    }

    /// Read an image from disk, inferring its type from content, then extension.
    pub async fn analyze_file(&mut self, gateway: &Gateway, path: &Path) -> Result<&str> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.reject(e.into())),
        };
        let Some(mime_type) = detect_image_mime(&bytes).or_else(|| mime_from_extension(path))
        else {
            return Err(self.reject(Error::Upload(
                "Unsupported file type. Use PNG, JPG or WEBP.".to_string(),
            )));
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        tracing::info!("Analyzing {} ({}, {} bytes)", file_name, mime_type, bytes.len());

        self.analyze_bytes(gateway, &file_name, &bytes, mime_type)
            .await
    }

    async fn submit(
        &mut self,
        gateway: &Gateway,
        file_name: &str,
        payload: &str,
        mime_type: &str,
    ) -> &str {
        self.error = None;
        self.file_name = Some(file_name.to_string());
        self.analysis = None;

        let analysis = gateway.analyze_image(payload, mime_type).await;
        self.analysis.insert(analysis).as_str()
    }
}
