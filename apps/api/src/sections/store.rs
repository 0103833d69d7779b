//! Section list operations.
//!
//! Every function takes the current list by reference and returns the next list.
//! There is no error channel: an unknown id or an invalid index leaves the list
//! exactly as it was. Callers that need to know whether something changed compare
//! the result against the input.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sections::defaults::{NEW_SECTION_CONTENT, NEW_SECTION_TITLE};

/// A titled block of resume text: the unit that is edited, reordered, and tailored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSection {
    /// Unique within a list and stable across edits and reorders.
    pub id: String,
    pub title: String,
    pub content: String,
}

impl ResumeSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Generates an id for a user-added section.
pub fn generate_section_id() -> String {
    format!("custom-{}", Uuid::new_v4().simple())
}

/// Appends a placeholder section with a freshly generated id.
pub fn add(sections: &[ResumeSection]) -> Vec<ResumeSection> {
    let mut next = sections.to_vec();
    let mut id = generate_section_id();
    // v4 collisions are not a practical concern, but the uniqueness invariant is absolute.
    while next.iter().any(|s| s.id == id) {
        id = generate_section_id();
    }
    next.push(ResumeSection::new(id, NEW_SECTION_TITLE, NEW_SECTION_CONTENT));
    next
}

/// Replaces title and content of the section with `id`.
pub fn update(sections: &[ResumeSection], id: &str, title: &str, content: &str) -> Vec<ResumeSection> {
    sections
        .iter()
        .map(|s| {
            if s.id == id {
                ResumeSection::new(s.id.clone(), title, content)
            } else {
                s.clone()
            }
        })
        .collect()
}

/// Replaces only the content of the section with `id`. Title and position are kept.
pub fn apply_tailored(sections: &[ResumeSection], id: &str, content: &str) -> Vec<ResumeSection> {
    sections
        .iter()
        .map(|s| {
            if s.id == id {
                ResumeSection::new(s.id.clone(), s.title.clone(), content)
            } else {
                s.clone()
            }
        })
        .collect()
}

/// Removes the section with `id`. May leave the list empty.
pub fn delete(sections: &[ResumeSection], id: &str) -> Vec<ResumeSection> {
    sections.iter().filter(|s| s.id != id).cloned().collect()
}

/// Moves the element at `from_index` to `to_index`, shifting everything between by one.
///
/// Out-of-range or equal indices return the list unchanged.
pub fn reorder(sections: &[ResumeSection], from_index: usize, to_index: usize) -> Vec<ResumeSection> {
    let mut next = sections.to_vec();
    if from_index == to_index || from_index >= next.len() || to_index >= next.len() {
        return next;
    }
    let moved = next.remove(from_index);
    next.insert(to_index, moved);
    next
}

/// Returns the section with `id`, if present.
pub fn find<'a>(sections: &'a [ResumeSection], id: &str) -> Option<&'a ResumeSection> {
    sections.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::defaults::default_sections;
    use std::collections::HashSet;

    fn ids(sections: &[ResumeSection]) -> Vec<String> {
        sections.iter().map(|s| s.id.clone()).collect()
    }

    fn id_set(sections: &[ResumeSection]) -> HashSet<String> {
        sections.iter().map(|s| s.id.clone()).collect()
    }

    // ── add ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_add_appends_placeholder_section() {
        let before = default_sections();
        let after = add(&before);
        assert_eq!(after.len(), 6);
        let added = after.last().unwrap();
        assert_eq!(added.title, "New Section");
        assert_eq!(added.content, "Add your content here...");
        assert!(added.id.starts_with("custom-"));
        assert_eq!(&after[..5], &before[..]);
    }

    #[test]
    fn test_add_generates_unique_ids() {
        let mut sections = Vec::new();
        for _ in 0..20 {
            sections = add(&sections);
        }
        assert_eq!(id_set(&sections).len(), 20);
    }

    #[test]
    fn test_add_then_delete_round_trips_id_set() {
        let before = default_sections();
        let added = add(&before);
        let new_id = added.last().unwrap().id.clone();
        let after = delete(&added, &new_id);
        assert_eq!(id_set(&after), id_set(&before));
    }

    #[test]
    fn test_add_on_empty_list() {
        let mut sections = default_sections();
        for id in ids(&default_sections()) {
            sections = delete(&sections, &id);
        }
        assert!(sections.is_empty());

        let sections = add(&sections);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "New Section");
    }

    // ── update / apply_tailored ─────────────────────────────────────────────

    #[test]
    fn test_update_replaces_title_and_content() {
        let after = update(&default_sections(), "summary", "Profile", "Rust engineer.");
        let summary = find(&after, "summary").unwrap();
        assert_eq!(summary.title, "Profile");
        assert_eq!(summary.content, "Rust engineer.");
        assert_eq!(ids(&after), ids(&default_sections()));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let before = default_sections();
        let after = update(&before, "does-not-exist", "x", "y");
        assert_eq!(after, before);
    }

    #[test]
    fn test_apply_tailored_changes_only_content() {
        let before = default_sections();
        let after = apply_tailored(&before, "skills", "Rust, Tokio, Axum");
        for (b, a) in before.iter().zip(after.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.title, b.title);
            if a.id == "skills" {
                assert_eq!(a.content, "Rust, Tokio, Axum");
            } else {
                assert_eq!(a.content, b.content);
            }
        }
    }

    #[test]
    fn test_apply_tailored_unknown_id_is_noop() {
        let before = default_sections();
        assert_eq!(apply_tailored(&before, "gone", "text"), before);
    }

    // ── delete ──────────────────────────────────────────────────────────────

    #[test]
    fn test_delete_removes_only_target() {
        let after = delete(&default_sections(), "education");
        assert_eq!(ids(&after), vec!["personal-info", "summary", "experience", "skills"]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let before = default_sections();
        assert_eq!(delete(&before, "nope"), before);
    }

    // ── reorder ─────────────────────────────────────────────────────────────

    #[test]
    fn test_reorder_moves_down() {
        let after = reorder(&default_sections(), 0, 3);
        assert_eq!(
            ids(&after),
            vec!["summary", "experience", "education", "personal-info", "skills"]
        );
    }

    #[test]
    fn test_reorder_moves_up() {
        let after = reorder(&default_sections(), 4, 1);
        assert_eq!(
            ids(&after),
            vec!["personal-info", "skills", "summary", "experience", "education"]
        );
    }

    #[test]
    fn test_reorder_equal_or_out_of_range_is_noop() {
        let before = default_sections();
        assert_eq!(reorder(&before, 2, 2), before);
        assert_eq!(reorder(&before, 5, 0), before);
        assert_eq!(reorder(&before, 0, 5), before);
        assert!(reorder(&[], 0, 1).is_empty());
    }

    #[test]
    fn test_reorder_preserves_ids_and_relative_order_for_all_pairs() {
        let before = default_sections();
        let n = before.len();
        for from in 0..n {
            for to in 0..n {
                if from == to {
                    continue;
                }
                let after = reorder(&before, from, to);
                assert_eq!(after.len(), n);
                assert_eq!(id_set(&after), id_set(&before));
                assert_eq!(after[to], before[from], "from={from} to={to}");

                let rest_before: Vec<&String> =
                    before.iter().filter(|s| s.id != before[from].id).map(|s| &s.id).collect();
                let rest_after: Vec<&String> =
                    after.iter().filter(|s| s.id != before[from].id).map(|s| &s.id).collect();
                assert_eq!(rest_before, rest_after, "from={from} to={to}");
            }
        }
    }
}
