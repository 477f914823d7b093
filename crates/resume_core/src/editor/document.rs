//! In-memory resume document (editor state).
//!
//! # Responsibility
//! - Own the ordered list of sections for one open editor session.
//! - Provide every structural edit as a value-returning operation.
//!
//! # Invariants
//! - Operations never mutate `self`; they return a new `Document`.
//! - Sections untouched by an operation are shared (`Arc`), not copied, so
//!   callers can detect changed sections with `Arc::ptr_eq`.
//! - Section ids are unique within a document.
//! - Operations on absent ids return an unchanged document, never an error.

use crate::model::content::SectionContent;
use crate::model::section::{fresh_id, Section, SectionId, SectionKind};
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;

const COPY_TITLE_SUFFIX: &str = " (Copy)";

/// Ordered sequence of sections constituting one resume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Arc<Section>>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from sections in display order.
    ///
    /// A section whose id repeats an earlier one is given a fresh id so the
    /// uniqueness invariant holds for documents assembled from loose input.
    pub fn from_sections(sections: impl IntoIterator<Item = Section>) -> Self {
        let mut seen = HashSet::new();
        let sections = sections
            .into_iter()
            .map(|mut section| {
                if !seen.insert(section.id.clone()) {
                    let replacement = fresh_id(section.kind().as_str());
                    warn!(
                        "event=document_build module=editor status=warn reason=duplicate_section_id kind={}",
                        section.kind()
                    );
                    section.id = replacement.clone();
                    seen.insert(replacement);
                }
                Arc::new(section)
            })
            .collect();
        Self { sections }
    }

    /// Sections in display order.
    pub fn sections(&self) -> &[Arc<Section>] {
        &self.sections
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().map(|section| section.as_ref())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Looks up a section by id.
    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.id == id)
            .map(|section| section.as_ref())
    }

    /// Position of section `id`, if present.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.id == id)
    }

    /// Section ids in display order.
    pub fn ids(&self) -> Vec<&str> {
        self.sections
            .iter()
            .map(|section| section.id.as_str())
            .collect()
    }

    /// Replaces the content of section `id`.
    ///
    /// Content of a different kind than the section is rejected as a no-op:
    /// a section's kind never changes after creation.
    pub fn update_section_content(&self, id: &str, content: SectionContent) -> Self {
        let Some(index) = self.index_of(id) else {
            return self.clone();
        };
        let current = &self.sections[index];
        if current.kind() != content.kind() {
            debug!(
                "event=section_update module=editor status=skipped reason=kind_mismatch kind={} content_kind={}",
                current.kind(),
                content.kind()
            );
            return self.clone();
        }
        self.replace_at(
            index,
            Section {
                id: current.id.clone(),
                title: current.title.clone(),
                content,
            },
        )
    }

    /// Replaces the title of section `id`.
    pub fn rename_section(&self, id: &str, title: impl Into<String>) -> Self {
        let Some(index) = self.index_of(id) else {
            return self.clone();
        };
        let current = &self.sections[index];
        self.replace_at(
            index,
            Section {
                id: current.id.clone(),
                title: title.into(),
                content: current.content.clone(),
            },
        )
    }

    /// Appends an empty section of `kind` and returns the new document with
    /// the fresh section id.
    pub fn add_section(&self, kind: SectionKind) -> (Self, SectionId) {
        let mut section = Section::new(kind);
        while self.index_of(&section.id).is_some() {
            section.id = fresh_id(kind.as_str());
        }
        let id = section.id.clone();
        let mut sections = self.sections.clone();
        sections.push(Arc::new(section));
        (Self { sections }, id)
    }

    /// Deletes section `id`.
    ///
    /// Confirmation is the caller's concern; see `editor::container`.
    pub fn remove_section(&self, id: &str) -> Self {
        let Some(index) = self.index_of(id) else {
            return self.clone();
        };
        let mut sections = self.sections.clone();
        sections.remove(index);
        Self { sections }
    }

    /// Inserts a deep copy of section `id` right after it.
    ///
    /// The copy gets a fresh id and a `" (Copy)"` title suffix. Header
    /// sections are not duplicable; asking for one is a no-op.
    pub fn duplicate_section(&self, id: &str) -> Self {
        let Some(index) = self.index_of(id) else {
            return self.clone();
        };
        let original = &self.sections[index];
        if !original.kind().is_duplicable() {
            return self.clone();
        }

        let mut copy_id = fresh_id(original.kind().as_str());
        while self.index_of(&copy_id).is_some() {
            copy_id = fresh_id(original.kind().as_str());
        }
        let copy = Section {
            id: copy_id,
            title: format!("{}{COPY_TITLE_SUFFIX}", original.title),
            content: original.content.clone(),
        };

        let mut sections = self.sections.clone();
        sections.insert(index + 1, Arc::new(copy));
        Self { sections }
    }

    /// Swaps section `id` with its predecessor. No-op at the first position.
    pub fn move_up(&self, id: &str) -> Self {
        match self.index_of(id) {
            Some(index) if index > 0 => self.swapped(index - 1, index),
            _ => self.clone(),
        }
    }

    /// Swaps section `id` with its successor. No-op at the last position.
    pub fn move_down(&self, id: &str) -> Self {
        match self.index_of(id) {
            Some(index) if index + 1 < self.sections.len() => self.swapped(index, index + 1),
            _ => self.clone(),
        }
    }

    /// Moves `dragged_id` so it sits immediately before `target_id`.
    ///
    /// The dragged section is spliced out first, then spliced back in at the
    /// target's index as resolved after the removal. No-op when the ids are
    /// equal or either is absent.
    ///
    /// Downward drags also land before the target. Inserting at the
    /// pre-removal index would put them after it instead.
    pub fn reorder(&self, dragged_id: &str, target_id: &str) -> Self {
        if dragged_id == target_id {
            return self.clone();
        }
        let (Some(from), Some(_)) = (self.index_of(dragged_id), self.index_of(target_id)) else {
            return self.clone();
        };

        let mut sections = self.sections.clone();
        let dragged = sections.remove(from);
        let to = sections
            .iter()
            .position(|section| section.id == target_id)
            .unwrap_or(sections.len());
        sections.insert(to, dragged);
        Self { sections }
    }

    /// Moves section `id` after all others (the "end" drop zone).
    pub fn move_to_end(&self, id: &str) -> Self {
        let Some(from) = self.index_of(id) else {
            return self.clone();
        };
        let mut sections = self.sections.clone();
        let moved = sections.remove(from);
        sections.push(moved);
        Self { sections }
    }

    fn replace_at(&self, index: usize, section: Section) -> Self {
        let mut sections = self.sections.clone();
        sections[index] = Arc::new(section);
        Self { sections }
    }

    fn swapped(&self, first: usize, second: usize) -> Self {
        let mut sections = self.sections.clone();
        sections.swap(first, second);
        Self { sections }
    }
}

impl FromIterator<Section> for Document {
    fn from_iter<T: IntoIterator<Item = Section>>(iter: T) -> Self {
        Self::from_sections(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::model::content::{HeaderContent, SectionContent};
    use crate::model::section::{Section, SectionKind};

    fn doc(ids: &[&str]) -> Document {
        ids.iter()
            .map(|id| Section::with_id(*id, *id, SectionContent::empty(SectionKind::Projects)))
            .collect()
    }

    #[test]
    fn reorder_places_dragged_before_target_in_both_directions() {
        let document = doc(&["a", "b", "c", "d"]);
        assert_eq!(document.reorder("a", "c").ids(), vec!["b", "a", "c", "d"]);
        assert_eq!(document.reorder("d", "b").ids(), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn reorder_ignores_self_and_unknown_ids() {
        let document = doc(&["a", "b"]);
        assert_eq!(document.reorder("a", "a"), document);
        assert_eq!(document.reorder("a", "zz"), document);
        assert_eq!(document.reorder("zz", "a"), document);
    }

    #[test]
    fn move_to_end_appends() {
        let document = doc(&["a", "b", "c"]);
        assert_eq!(document.move_to_end("a").ids(), vec!["b", "c", "a"]);
        assert_eq!(document.move_to_end("c").ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicate_ids_are_replaced_on_build() {
        let document = doc(&["a", "a"]);
        let ids = document.ids();
        assert_eq!(ids[0], "a");
        assert_ne!(ids[1], "a");
    }

    #[test]
    fn update_with_other_kind_is_ignored() {
        let document = Document::from_sections([Section::with_id(
            "header-1",
            "Personal Details",
            SectionContent::Header(HeaderContent::default()),
        )]);
        let updated =
            document.update_section_content("header-1", SectionContent::empty(SectionKind::Skills));
        assert_eq!(updated, document);
    }
}
