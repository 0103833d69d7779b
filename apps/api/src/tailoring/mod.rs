// AI Tailoring: one request per invocation, result held as a pending suggestion
// until the user applies or dismisses it.
// All LLM calls go through llm_client: no direct provider calls here.

pub mod client;
pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};

pub use client::{LlmSectionTailor, SectionTailor, TailorError};

/// Input to a tailoring call. Serializes with the provider-facing field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorRequest {
    pub job_description: String,
    /// Title of the section being tailored.
    pub resume_section: String,
    pub current_content: String,
}

/// Output of a tailoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorResult {
    pub tailored_content: String,
}

/// A suggestion awaiting the user's decision. Replaced by the next successful call;
/// no history is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingSuggestion {
    pub section_id: String,
    pub original_content: String,
    pub tailored_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_names() {
        let request = TailorRequest {
            job_description: "Rust engineer".to_string(),
            resume_section: "Skills".to_string(),
            current_content: "Python".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jobDescription"], "Rust engineer");
        assert_eq!(value["resumeSection"], "Skills");
        assert_eq!(value["currentContent"], "Python");
    }

    #[test]
    fn test_result_wire_name() {
        let result: TailorResult =
            serde_json::from_str(r#"{"tailoredContent": "Rust, Tokio"}"#).unwrap();
        assert_eq!(result.tailored_content, "Rust, Tokio");
    }
}
