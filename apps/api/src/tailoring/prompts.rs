// All LLM prompt constants for the Tailoring module.

/// System prompt for section tailoring: enforces JSON-only output.
pub const TAILOR_SYSTEM: &str = "You are a resume expert who rewrites resume sections \
    so they match a target job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Tailoring prompt template.
/// Replace: {job_description}, {resume_section}, {current_content}
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"You will be provided with a job description, a resume section, and the current content of that resume section.
Your goal is to tailor the resume section to the job description, improving the wording and highlighting the most relevant information.

Job Description: {job_description}

Resume Section: {resume_section}

Current Content: {current_content}

Return a JSON object with this EXACT schema (no extra fields):
{
  "tailoredContent": "the tailored content of the resume section"
}

Keep the section's line structure (one entry per line, bullets prefixed with "- ") unless the job description clearly calls for a different layout."#;
