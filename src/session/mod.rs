//! Headless caller layer
//!
//! The state the portfolio page keeps around each gateway call: the chat
//! transcript, the header banner with its placeholder fallback, and the
//! skill-proof scanner that validates uploads before they reach the gateway.
//! The career timeline is static content shown alongside them.

pub mod chat;
pub mod header;
pub mod skill;
pub mod timeline;

pub use chat::ChatTranscript;
pub use header::HeaderBanner;
pub use skill::{strip_data_uri, validate_upload, SkillScanner};
pub use timeline::{Timeline, TimelineItem};
