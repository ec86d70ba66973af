use crate::slot::RequestSlot;
use crate::Gateway;
use std::sync::{Mutex, PoisonError};

pub const DEFAULT_COMPANY: &str = "Google";
pub const PLACEHOLDER_IMAGE: &str = "https://picsum.photos/1280/720?grayscale&blur=2";
/// Shown when generation comes back empty.
pub const FALLBACK_IMAGE: &str = "https://picsum.photos/1280/720?grayscale&blur=2&random=1";

/// Header banner state: the company being branded and the current image.
///
/// Regenerations may overlap; only the most recently started one updates the
/// image.
#[derive(Debug)]
pub struct HeaderBanner {
    company_name: Mutex<String>,
    image_src: Mutex<Option<String>>,
    slot: RequestSlot,
}

impl HeaderBanner {
    pub fn new() -> Self {
        Self {
            company_name: Mutex::new(DEFAULT_COMPANY.to_string()),
            image_src: Mutex::new(Some(PLACEHOLDER_IMAGE.to_string())),
            slot: RequestSlot::new(),
        }
    }

    pub fn company_name(&self) -> String {
        self.company_name
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_company_name(&self, name: impl Into<String>) {
        *self
            .company_name
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = name.into();
    }

    /// `None` while a regeneration is in flight.
    pub fn image_src(&self) -> Option<String> {
        self.image_src
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_image_src(&self, src: Option<String>) {
        *self.image_src.lock().unwrap_or_else(PoisonError::into_inner) = src;
    }

    /// Generate a new banner for the current company name.
    ///
    /// Returns the new image source, or `None` when the company name is blank
    /// or a newer regeneration superseded this one.
    pub async fn regenerate(&self, gateway: &Gateway) -> Option<String> {
        let company = self.company_name();
        if company.trim().is_empty() {
            return None;
        }

        self.set_image_src(None);
        let generated = self.slot.run(gateway.generate_image(&company)).await?;

        let src = if generated.is_empty() {
            FALLBACK_IMAGE.to_string()
        } else {
            generated
        };
        self.set_image_src(Some(src.clone()));
        Some(src)
    }
}

impl Default for HeaderBanner {
    fn default() -> Self {
        Self::new()
    }
}
