//! AI gateway for a single-page personal portfolio
//!
//! Wraps every call the portfolio makes to the Gemini API (grounded chat,
//! header image generation, and uploaded-image analysis) behind one stateless
//! façade that never fails, plus the headless caller layer that holds the
//! chat transcript, the header banner, and the skill-proof upload checks.

pub mod ai;
pub mod error;
pub mod gateway;
pub mod knowledge;
pub mod models;
pub mod prompts;
pub mod session;
pub mod slot;

pub use error::{Error, Result};
pub use gateway::{Gateway, GatewayFailure};
