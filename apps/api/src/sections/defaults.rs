//! Built-in sections every new editing session starts with.

use crate::sections::store::ResumeSection;

/// Title given to sections created through `add`.
pub const NEW_SECTION_TITLE: &str = "New Section";

/// Placeholder body given to sections created through `add`.
pub const NEW_SECTION_CONTENT: &str = "Add your content here...";

/// Returns the five default sections in document order.
///
/// Ids are fixed so clients can address built-ins without a lookup.
pub fn default_sections() -> Vec<ResumeSection> {
    vec![
        ResumeSection::new(
            "personal-info",
            "Personal Information",
            "Your Name\nyour.email@example.com\n(555) 123-4567\nLinkedIn Profile URL (Optional)",
        ),
        ResumeSection::new(
            "summary",
            "Summary",
            "A brief professional summary highlighting your key qualifications and career goals. \
             Tailor this to each job application.",
        ),
        ResumeSection::new(
            "experience",
            "Work Experience",
            "Job Title | Company Name | City, State | Month Year - Month Year (or Present)\n\
             - Accomplishment or responsibility, quantified if possible.\n\
             - Another key achievement using action verbs.",
        ),
        ResumeSection::new(
            "education",
            "Education",
            "Degree Name | Major/Minor | University Name | City, State | Graduation Month Year\n\
             - Relevant coursework, honors, or GPA (optional).",
        ),
        ResumeSection::new(
            "skills",
            "Skills",
            "Technical Skills: JavaScript, Python, React, SQL\n\
             Soft Skills: Communication, Teamwork, Problem-solving",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_sections_order() {
        let titles: Vec<String> = default_sections().into_iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Personal Information",
                "Summary",
                "Work Experience",
                "Education",
                "Skills"
            ]
        );
    }

    #[test]
    fn test_default_section_ids_are_unique() {
        let sections = default_sections();
        let ids: HashSet<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), sections.len());
    }

    #[test]
    fn test_default_multiline_content_keeps_line_breaks() {
        let sections = default_sections();
        let experience = sections.iter().find(|s| s.id == "experience").unwrap();
        assert_eq!(experience.content.lines().count(), 3);
        assert!(experience.content.lines().nth(1).unwrap().starts_with("- "));
    }
}
