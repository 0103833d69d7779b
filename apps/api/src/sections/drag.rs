//! Drag Reorder Controller: turns pointer hover telemetry into discrete reorders.
//!
//! The browser reports, for each hover event, which list item is under the pointer,
//! that item's vertical bounds, and the pointer's y coordinate (all in client pixels).
//! A swap only happens once the pointer has crossed the hovered item's midpoint in the
//! direction of travel, which keeps the list from oscillating when the pointer sits
//! near a boundary.

use serde::{Deserialize, Serialize};

use crate::sections::store::{self, ResumeSection};

/// The in-flight drag gesture of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragGesture {
    pub section_id: String,
    /// Current index of the dragged item. Updated after every reorder.
    pub index: usize,
}

/// One hover event over a candidate drop target.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HoverSample {
    pub hover_index: usize,
    pub target_top: f64,
    pub target_bottom: f64,
    pub pointer_y: f64,
}

/// Outcome of feeding a hover sample to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverOutcome {
    /// The pointer has not crossed far enough; list unchanged.
    Hold,
    /// Exactly one reorder was issued.
    Moved {
        from: usize,
        to: usize,
        sections: Vec<ResumeSection>,
    },
}

impl DragGesture {
    /// Starts a gesture on the item at `index`. Returns `None` when the index is out of range.
    pub fn start(sections: &[ResumeSection], index: usize) -> Option<Self> {
        sections.get(index).map(|s| DragGesture {
            section_id: s.id.clone(),
            index,
        })
    }

    /// Applies a hover sample. On a crossing, reorders and tracks the new index.
    pub fn hover(&mut self, sections: &[ResumeSection], sample: &HoverSample) -> HoverOutcome {
        let drag_index = self.index;
        let hover_index = sample.hover_index;

        if drag_index == hover_index || hover_index >= sections.len() || drag_index >= sections.len()
        {
            return HoverOutcome::Hold;
        }

        let hover_middle_y = (sample.target_bottom - sample.target_top) / 2.0;
        let hover_client_y = sample.pointer_y - sample.target_top;

        // Dragging downward: only move once the pointer is below half the target height.
        if drag_index < hover_index && hover_client_y < hover_middle_y {
            return HoverOutcome::Hold;
        }
        // Dragging upward: only move once the pointer is above half the target height.
        if drag_index > hover_index && hover_client_y > hover_middle_y {
            return HoverOutcome::Hold;
        }

        let next = store::reorder(sections, drag_index, hover_index);
        self.index = hover_index;

        HoverOutcome::Moved {
            from: drag_index,
            to: hover_index,
            sections: next,
        }
    }
}
