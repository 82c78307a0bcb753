//! Advice facade used by the portal.
//!
//! Both operations always return displayable text. A generator error or an empty completion is
//! replaced by a fixed fallback; errors are logged, never propagated.

use crate::config::AdviceConfig;
use crate::gemini::GeminiClient;
use crate::generator::TextGenerator;
use crate::prompts::{first_aid_prompt, symptom_triage_prompt};
use crate::AdviceResult;
use portal_core::records::MedicalRecord;

/// Returned when first-aid generation fails.
pub const FIRST_AID_FALLBACK: &str =
    "Ensure patient airway is clear and monitor vitals until help arrives.";

/// Returned when triage generation fails or no symptoms were given.
pub const TRIAGE_FALLBACK: &str =
    "Please consult with the attending physician or visit the triage station for immediate assessment.";

/// Returned when the model answered with no first-aid text.
pub const FIRST_AID_EMPTY: &str = "No AI advice available at this time.";

/// Returned when the model answered with no triage text.
pub const TRIAGE_EMPTY: &str = "Information unavailable.";

pub struct AdviceService<G> {
    generator: G,
}

impl AdviceService<GeminiClient> {
    pub fn from_config(cfg: &AdviceConfig) -> AdviceResult<Self> {
        Ok(Self::new(GeminiClient::new(cfg)?))
    }
}

impl<G: TextGenerator> AdviceService<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// First-responder briefing for an emergency alert.
    pub async fn first_aid_advice(&self, record: &MedicalRecord) -> String {
        let prompt = first_aid_prompt(record);
        self.complete(&prompt, "first_aid", FIRST_AID_EMPTY, FIRST_AID_FALLBACK)
            .await
    }

    /// General guidance for patient-reported symptoms.
    ///
    /// Blank symptoms never reach the generator.
    pub async fn analyze_symptoms(&self, symptoms: &str, record: &MedicalRecord) -> String {
        if symptoms.trim().is_empty() {
            tracing::debug!("no symptoms given; returning triage fallback");
            return TRIAGE_FALLBACK.to_string();
        }
        let prompt = symptom_triage_prompt(symptoms, record);
        self.complete(&prompt, "symptom_triage", TRIAGE_EMPTY, TRIAGE_FALLBACK)
            .await
    }

    async fn complete(
        &self,
        prompt: &str,
        purpose: &'static str,
        empty: &str,
        fallback: &str,
    ) -> String {
        match self.generator.generate(prompt).await {
            Ok(text) if text.trim().is_empty() => {
                tracing::info!(purpose, "generator returned no text");
                empty.to_string()
            }
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(purpose, error = %e, "advice generation failed; using fallback");
                fallback.to_string()
            }
        }
    }
}
