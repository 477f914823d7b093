//! Drag-to-reorder controller.
//!
//! # Responsibility
//! - Track one drag gesture as an explicit state machine.
//! - Commit a finished gesture as a single `Document::reorder` (or
//!   `move_to_end` for the end zone).
//!
//! # Invariants
//! - Hovering the dragged section itself never produces a target.
//! - `end` and `cancel` always return the controller to `Idle`.
//! - Only `end` from `DraggingOverTarget` changes the document.

use crate::editor::document::Document;
use crate::model::section::SectionId;
use log::debug;

/// Where a dragged section would land on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Immediately before this section.
    Section(SectionId),
    /// After the last section.
    End,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        dragged: SectionId,
    },
    DraggingOverTarget {
        dragged: SectionId,
        target: DropTarget,
    },
}

/// Drag gesture controller for one editor session.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Section currently being dragged, if any.
    pub fn dragged(&self) -> Option<&str> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { dragged } | DragState::DraggingOverTarget { dragged, .. } => {
                Some(dragged)
            }
        }
    }

    /// Current drop target, if any.
    pub fn target(&self) -> Option<&DropTarget> {
        match &self.state {
            DragState::DraggingOverTarget { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Whether the drop indicator should show above section `id`.
    pub fn is_target(&self, id: &str) -> bool {
        matches!(self.target(), Some(DropTarget::Section(target)) if target == id)
    }

    /// Whether the end-zone indicator should show.
    pub fn is_end_target(&self) -> bool {
        matches!(self.target(), Some(DropTarget::End))
    }

    /// Starts dragging section `id`. Ignored while a gesture is in progress.
    pub fn begin(&mut self, id: impl Into<SectionId>) {
        if self.state == DragState::Idle {
            self.state = DragState::Dragging { dragged: id.into() };
        }
    }

    /// Updates the hovered drop target.
    pub fn drag_over(&mut self, target: DropTarget) {
        let Some(dragged) = self.dragged().map(str::to_string) else {
            return;
        };
        if matches!(&target, DropTarget::Section(id) if *id == dragged) {
            return;
        }
        self.state = DragState::DraggingOverTarget { dragged, target };
    }

    /// Finishes the gesture and returns the resulting document.
    pub fn end(&mut self, document: &Document) -> Document {
        let next = match std::mem::take(&mut self.state) {
            DragState::DraggingOverTarget {
                dragged,
                target: DropTarget::Section(target),
            } => document.reorder(&dragged, &target),
            DragState::DraggingOverTarget {
                dragged,
                target: DropTarget::End,
            } => document.move_to_end(&dragged),
            DragState::Dragging { .. } | DragState::Idle => document.clone(),
        };
        debug!(
            "event=drag_end module=editor status=ok changed={}",
            next != *document
        );
        next
    }

    /// Abandons the gesture without reordering.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::{DragController, DragState, DropTarget};

    #[test]
    fn hovering_dragged_section_keeps_state() {
        let mut drag = DragController::new();
        drag.begin("a");
        drag.drag_over(DropTarget::Section("a".to_string()));
        assert_eq!(
            drag.state(),
            &DragState::Dragging {
                dragged: "a".to_string()
            }
        );
    }

    #[test]
    fn drag_over_in_idle_is_ignored() {
        let mut drag = DragController::new();
        drag.drag_over(DropTarget::End);
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn begin_during_gesture_is_ignored() {
        let mut drag = DragController::new();
        drag.begin("a");
        drag.begin("b");
        assert_eq!(drag.dragged(), Some("a"));
    }

    #[test]
    fn target_helpers_follow_state() {
        let mut drag = DragController::new();
        drag.begin("a");
        drag.drag_over(DropTarget::Section("b".to_string()));
        assert!(drag.is_target("b"));
        assert!(!drag.is_end_target());
        drag.drag_over(DropTarget::End);
        assert!(!drag.is_target("b"));
        assert!(drag.is_end_target());
        drag.cancel();
        assert_eq!(drag.state(), &DragState::Idle);
    }
}
