//! Per-section container chrome.
//!
//! # Responsibility
//! - Derive the affordances shown around each section (move, duplicate,
//!   delete, drag indicators) from document position and drag state.
//! - Gate section deletion behind a confirmation capability.
//!
//! # Invariants
//! - Chrome is derived data; it never feeds back into the document.
//! - A declined confirmation leaves the document unchanged.

use crate::editor::document::Document;
use crate::editor::drag::DragController;
use crate::model::section::{SectionId, SectionKind};
use log::info;

/// Capability that asks the user to confirm a destructive action.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Affordances for one section, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionChrome {
    pub id: SectionId,
    pub kind: SectionKind,
    pub title: String,
    pub is_first: bool,
    pub is_last: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
    pub can_duplicate: bool,
    pub is_dragging: bool,
    pub drop_indicator_active: bool,
}

/// Derives chrome for every section of `document`.
pub fn section_chrome(document: &Document, drag: &DragController) -> Vec<SectionChrome> {
    let last = document.len().saturating_sub(1);
    document
        .iter()
        .enumerate()
        .map(|(index, section)| SectionChrome {
            id: section.id.clone(),
            kind: section.kind(),
            title: section.title.clone(),
            is_first: index == 0,
            is_last: index == last,
            can_move_up: index > 0,
            can_move_down: index < last,
            can_duplicate: section.kind().is_duplicable(),
            is_dragging: drag.dragged() == Some(section.id.as_str()),
            drop_indicator_active: drag.is_target(&section.id),
        })
        .collect()
}

/// Message shown before deleting a section titled `title`.
pub fn delete_prompt(title: &str) -> String {
    format!("Are you sure you want to delete this {title} section?")
}

/// Removes section `id` after the prompt approves.
///
/// Returns the unchanged document when the section is absent or the user
/// declines.
pub fn confirm_and_remove(
    document: &Document,
    id: &str,
    prompt: &mut impl ConfirmPrompt,
) -> Document {
    let Some(section) = document.get(id) else {
        return document.clone();
    };
    if !prompt.confirm(&delete_prompt(&section.title)) {
        info!(
            "event=section_delete module=editor status=declined kind={}",
            section.kind()
        );
        return document.clone();
    }
    info!(
        "event=section_delete module=editor status=ok kind={}",
        section.kind()
    );
    document.remove_section(id)
}

#[cfg(test)]
mod tests {
    use super::{confirm_and_remove, delete_prompt, section_chrome};
    use crate::editor::document::Document;
    use crate::editor::drag::{DragController, DropTarget};
    use crate::model::content::SectionContent;
    use crate::model::section::{Section, SectionKind};

    fn document() -> Document {
        Document::from_sections([
            Section::with_id(
                "h",
                "Personal Details",
                SectionContent::empty(SectionKind::Header),
            ),
            Section::with_id("e", "Education", SectionContent::empty(SectionKind::Education)),
            Section::with_id("s", "Skills", SectionContent::empty(SectionKind::Skills)),
        ])
    }

    #[test]
    fn chrome_reflects_position_and_kind() {
        let chrome = section_chrome(&document(), &DragController::new());
        assert!(chrome[0].is_first && !chrome[0].can_move_up);
        assert!(!chrome[0].can_duplicate);
        assert!(chrome[1].can_move_up && chrome[1].can_move_down);
        assert!(chrome[2].is_last && !chrome[2].can_move_down);
        assert!(chrome[2].can_duplicate);
    }

    #[test]
    fn chrome_marks_dragged_and_target() {
        let mut drag = DragController::new();
        drag.begin("s");
        drag.drag_over(DropTarget::Section("e".to_string()));
        let chrome = section_chrome(&document(), &drag);
        assert!(chrome[2].is_dragging);
        assert!(chrome[1].drop_indicator_active);
        assert!(!chrome[0].drop_indicator_active);
    }

    #[test]
    fn declined_delete_keeps_document() {
        let document = document();
        let mut asked = Vec::new();
        let mut decline = |message: &str| {
            asked.push(message.to_string());
            false
        };
        let next = confirm_and_remove(&document, "e", &mut decline);
        assert_eq!(next, document);
        assert_eq!(asked, vec![delete_prompt("Education")]);
    }

    #[test]
    fn accepted_delete_removes_section() {
        let next = confirm_and_remove(&document(), "e", &mut |_: &str| true);
        assert_eq!(next.ids(), vec!["h", "s"]);
    }

    #[test]
    fn prompt_names_section_title() {
        assert_eq!(
            delete_prompt("Work Experience"),
            "Are you sure you want to delete this Work Experience section?"
        );
    }
}
