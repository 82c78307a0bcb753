//! HTTP client for the Gemini `generateContent` endpoint.

use crate::config::AdviceConfig;
use crate::generator::TextGenerator;
use crate::{AdviceError, AdviceResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(cfg: &AdviceConfig) -> AdviceResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| AdviceError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: cfg.endpoint().to_string(),
            model: cfg.model().to_string(),
            api_key: cfg.api_key().map(str::to_owned),
            timeout_secs: cfg.timeout_secs(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Request body for `models/{model}:generateContent`
#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        }
    }
}

/// Response body from `models/{model}:generateContent`
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate; empty when the model produced none.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> AdviceResult<String> {
        let api_key = self.api_key.as_deref().ok_or(AdviceError::MissingApiKey)?;

        let response = self
            .http
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&GenerateRequest::new(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AdviceError::Connection(self.endpoint.clone())
                } else if e.is_timeout() {
                    AdviceError::Timeout(self.timeout_secs)
                } else {
                    AdviceError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdviceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AdviceError::ResponseParsing(e.to_string()))?;

        tracing::debug!(model = %self.model, "text generation completed");
        Ok(parsed.into_text())
    }
}
