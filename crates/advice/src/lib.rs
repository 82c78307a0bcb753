//! AI advice collaborator for the ward portal.
//!
//! The portal asks a generative-language model for two kinds of text: a first-responder summary
//! when an emergency alert is raised, and general triage guidance for symptoms a patient types
//! in. Both go through [`AdviceService`], which never fails: any generator error is logged and
//! replaced by a fixed, conservative fallback.
//!
//! - [`TextGenerator`]: the prompt-in, text-out seam
//! - [`GeminiClient`]: HTTP implementation against the Gemini `generateContent` endpoint
//! - [`prompts`]: prompt templates built from a patient's [`portal_core::records::MedicalRecord`]

pub mod config;
pub mod gemini;
pub mod generator;
pub mod prompts;
pub mod service;

pub use config::AdviceConfig;
pub use gemini::GeminiClient;
pub use generator::TextGenerator;
pub use service::{AdviceService, FIRST_AID_FALLBACK, TRIAGE_FALLBACK};

/// Errors returned by text generators.
///
/// These never reach [`AdviceService`] callers; they are surfaced for direct generator use and
/// for logging.
#[derive(Debug, thiserror::Error)]
pub enum AdviceError {
    #[error("no API key configured for the text-generation service")]
    MissingApiKey,

    #[error("invalid advice configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot reach text-generation service at {0}")]
    Connection(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("text-generation service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("failed to parse text-generation response: {0}")]
    ResponseParsing(String),
}

/// Type alias for Results that can fail with an [`AdviceError`].
pub type AdviceResult<T> = Result<T, AdviceError>;
