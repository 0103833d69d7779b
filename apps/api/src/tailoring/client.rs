//! Tailoring client: pluggable, trait-based rewriter for a single resume section.
//!
//! Default: `LlmSectionTailor` (one Messages API call through `LlmClient`).
//! Any backend that accepts `TailorRequest` and returns `TailorResult` can stand in.
//!
//! `AppState` holds an `Arc<dyn SectionTailor>`.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::LlmClient;
use crate::tailoring::prompts::{TAILOR_PROMPT_TEMPLATE, TAILOR_SYSTEM};
use crate::tailoring::{TailorRequest, TailorResult};

/// Single, undifferentiated failure. Transport, provider, and output-shape problems
/// all land here; the detail is kept for logs only.
#[derive(Debug, Error)]
pub enum TailorError {
    #[error("tailoring failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait SectionTailor: Send + Sync {
    async fn tailor(&self, request: &TailorRequest) -> Result<TailorResult, TailorError>;
}

/// Tailors sections through the shared LLM client.
pub struct LlmSectionTailor(pub LlmClient);

#[async_trait]
impl SectionTailor for LlmSectionTailor {
    async fn tailor(&self, request: &TailorRequest) -> Result<TailorResult, TailorError> {
        let prompt = build_prompt(request);
        info!(
            "Tailoring section '{}' ({} chars) against a {} char job description",
            request.resume_section,
            request.current_content.len(),
            request.job_description.len()
        );
        self.0
            .call_json::<TailorResult>(&prompt, TAILOR_SYSTEM)
            .await
            .map_err(|e| {
                warn!("Tailoring call failed: {e}");
                TailorError::Failed(e.to_string())
            })
    }
}

/// Interpolates the request into the prompt template in a single pass, so text inside
/// one field is never mistaken for another field's placeholder.
pub fn build_prompt(request: &TailorRequest) -> String {
    let fields = [
        ("{job_description}", request.job_description.as_str()),
        ("{resume_section}", request.resume_section.as_str()),
        ("{current_content}", request.current_content.as_str()),
    ];

    let mut out = String::with_capacity(
        TAILOR_PROMPT_TEMPLATE.len()
            + fields.iter().map(|(_, value)| value.len()).sum::<usize>(),
    );
    let mut rest = TAILOR_PROMPT_TEMPLATE;

    while !rest.is_empty() {
        let next = fields
            .iter()
            .filter_map(|(placeholder, value)| {
                rest.find(placeholder).map(|pos| (pos, *placeholder, *value))
            })
            .min_by_key(|(pos, _, _)| *pos);

        match next {
            Some((pos, placeholder, value)) => {
                out.push_str(&rest[..pos]);
                out.push_str(value);
                rest = &rest[pos + placeholder.len()..];
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(job: &str, title: &str, content: &str) -> TailorRequest {
        TailorRequest {
            job_description: job.to_string(),
            resume_section: title.to_string(),
            current_content: content.to_string(),
        }
    }

    #[test]
    fn test_build_prompt_interpolates_all_fields() {
        let prompt = build_prompt(&request(
            "Senior Rust Engineer, async networking",
            "Skills",
            "Technical Skills: Python",
        ));
        assert!(prompt.contains("Job Description: Senior Rust Engineer, async networking"));
        assert!(prompt.contains("Resume Section: Skills"));
        assert!(prompt.contains("Current Content: Technical Skills: Python"));
        assert!(!prompt.contains("{job_description}"));
        assert!(!prompt.contains("{resume_section}"));
        assert!(!prompt.contains("{current_content}"));
        assert!(prompt.contains("\"tailoredContent\""));
    }

    #[test]
    fn test_build_prompt_does_not_expand_placeholders_inside_values() {
        let prompt = build_prompt(&request("mentions {current_content} literally", "Skills", "SECRET"));
        assert!(prompt.contains("Job Description: mentions {current_content} literally"));
        assert_eq!(prompt.matches("SECRET").count(), 1);
    }

    #[test]
    fn test_build_prompt_keeps_multiline_content() {
        let prompt = build_prompt(&request("JD", "Work Experience", "line one\n- line two"));
        assert!(prompt.contains("Current Content: line one\n- line two"));
    }
}
