//! Section form operations.
//!
//! # Responsibility
//! - Provide per-kind edit operations that emit a replacement content value.
//! - Bridge item-level edits into `Document::update_section_content`.
//!
//! # Invariants
//! - Every operation is a pure function of its inputs (controlled forms).
//! - `update_item` changes exactly one field of one item; list order and all
//!   sibling items stay as they were.
//! - Skill removal is index-based; apply one list operation at a time.

use crate::editor::document::Document;
use crate::model::content::{
    HeaderContent, HeaderField, ItemRecord, SectionContent, SkillCategory, SkillsContent,
};
use crate::model::section::{fresh_id, ItemId};

const NEW_CATEGORY_NAME: &str = "New Category";
const CATEGORY_ID_PREFIX: &str = "cat";

/// Appends a blank item with a fresh id.
pub fn add_item<T: ItemRecord>(items: &[T]) -> (Vec<T>, ItemId) {
    let mut id = fresh_id(T::ID_PREFIX);
    while items.iter().any(|item| item.id() == id) {
        id = fresh_id(T::ID_PREFIX);
    }
    let mut next = items.to_vec();
    next.push(T::blank(id.clone()));
    (next, id)
}

/// Replaces one field of item `item_id`. Unknown ids leave the list as is.
pub fn update_item<T: ItemRecord>(
    items: &[T],
    item_id: &str,
    field: T::Field,
    value: impl Into<String>,
) -> Vec<T> {
    let value = value.into();
    items
        .iter()
        .map(|item| {
            if item.id() == item_id {
                let mut updated = item.clone();
                updated.set_field(field, value.clone());
                updated
            } else {
                item.clone()
            }
        })
        .collect()
}

/// Deletes item `item_id`.
///
/// The model allows an empty list; see [`can_remove_item`] for the UI policy.
pub fn remove_item<T: ItemRecord>(items: &[T], item_id: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.id() != item_id)
        .cloned()
        .collect()
}

/// UI policy: the delete affordance is hidden while exactly one item remains.
pub fn can_remove_item<T>(items: &[T]) -> bool {
    items.len() > 1
}

/// Replaces one header field.
pub fn update_header_field(
    header: &HeaderContent,
    field: HeaderField,
    value: impl Into<String>,
) -> HeaderContent {
    let mut next = header.clone();
    next.set_field(field, value.into());
    next
}

/// Skills form state.
///
/// Only the active-category focus lives here; it is UI state and is never
/// persisted. All content operations return a new [`SkillsContent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillsForm {
    active_category: Option<ItemId>,
}

impl SkillsForm {
    /// Creates form state focused on the first category, if any.
    pub fn new(content: &SkillsContent) -> Self {
        Self {
            active_category: content.categories.first().map(|category| category.id.clone()),
        }
    }

    pub fn active_category_id(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    /// The focused category, if it still exists in `content`.
    pub fn active<'a>(&self, content: &'a SkillsContent) -> Option<&'a SkillCategory> {
        self.active_category
            .as_deref()
            .and_then(|id| content.category(id))
    }

    /// Focuses category `id` when present.
    pub fn select(&mut self, content: &SkillsContent, id: &str) {
        if content.category(id).is_some() {
            self.active_category = Some(id.to_string());
        }
    }

    /// Appends a "New Category" and focuses it.
    pub fn add_category(&mut self, content: &SkillsContent) -> SkillsContent {
        let mut id = fresh_id(CATEGORY_ID_PREFIX);
        while content.category(&id).is_some() {
            id = fresh_id(CATEGORY_ID_PREFIX);
        }
        let mut next = content.clone();
        next.categories.push(SkillCategory {
            id: id.clone(),
            name: NEW_CATEGORY_NAME.to_string(),
            skills: Vec::new(),
        });
        self.active_category = Some(id);
        next
    }

    /// Renames category `id`.
    pub fn rename_category(
        &self,
        content: &SkillsContent,
        id: &str,
        name: impl Into<String>,
    ) -> SkillsContent {
        let name = name.into();
        map_category(content, id, |category| category.name = name.clone())
    }

    /// UI policy: a category can be removed only while more than one exists.
    pub fn can_remove_category(&self, content: &SkillsContent) -> bool {
        content.categories.len() > 1
    }

    /// Removes category `id`; focus falls back to the first remaining one.
    pub fn remove_category(&mut self, content: &SkillsContent, id: &str) -> SkillsContent {
        let mut next = content.clone();
        next.categories.retain(|category| category.id != id);
        if self.active_category.as_deref() == Some(id) {
            self.active_category = next.categories.first().map(|category| category.id.clone());
        }
        next
    }

    /// Appends a trimmed skill to category `id`; blank input is ignored.
    pub fn add_skill(&self, content: &SkillsContent, id: &str, skill: &str) -> SkillsContent {
        let skill = skill.trim();
        if skill.is_empty() {
            return content.clone();
        }
        map_category(content, id, |category| category.skills.push(skill.to_string()))
    }

    /// Removes the skill at `index` from category `id`.
    pub fn remove_skill(&self, content: &SkillsContent, id: &str, index: usize) -> SkillsContent {
        map_category(content, id, |category| {
            if index < category.skills.len() {
                category.skills.remove(index);
            }
        })
    }
}

fn map_category(
    content: &SkillsContent,
    id: &str,
    mut apply: impl FnMut(&mut SkillCategory),
) -> SkillsContent {
    let mut next = content.clone();
    for category in next.categories.iter_mut().filter(|category| category.id == id) {
        apply(category);
    }
    next
}

impl Document {
    /// Appends a blank item to list section `section_id`.
    ///
    /// Returns the new document and the fresh item id; `None` when the
    /// section is absent or holds another item kind.
    pub fn add_item<T: ItemRecord>(&self, section_id: &str) -> (Self, Option<ItemId>) {
        let Some(items) = self.items_of::<T>(section_id) else {
            return (self.clone(), None);
        };
        let (next, id) = add_item(items);
        (
            self.update_section_content(section_id, T::into_content(next)),
            Some(id),
        )
    }

    /// Replaces one field of one item in list section `section_id`.
    pub fn update_item<T: ItemRecord>(
        &self,
        section_id: &str,
        item_id: &str,
        field: T::Field,
        value: impl Into<String>,
    ) -> Self {
        match self.items_of::<T>(section_id) {
            Some(items) if items.iter().any(|item| item.id() == item_id) => self
                .update_section_content(
                    section_id,
                    T::into_content(update_item(items, item_id, field, value)),
                ),
            _ => self.clone(),
        }
    }

    /// Deletes one item from list section `section_id`.
    pub fn remove_item<T: ItemRecord>(&self, section_id: &str, item_id: &str) -> Self {
        match self.items_of::<T>(section_id) {
            Some(items) if items.iter().any(|item| item.id() == item_id) => self
                .update_section_content(section_id, T::into_content(remove_item(items, item_id))),
            _ => self.clone(),
        }
    }

    /// Replaces one field of header section `section_id`.
    pub fn update_header_field(
        &self,
        section_id: &str,
        field: HeaderField,
        value: impl Into<String>,
    ) -> Self {
        match self.get(section_id).map(|section| &section.content) {
            Some(SectionContent::Header(header)) => self.update_section_content(
                section_id,
                SectionContent::Header(update_header_field(header, field, value)),
            ),
            _ => self.clone(),
        }
    }

    /// Applies a skills form operation to skills section `section_id`.
    pub fn update_skills(
        &self,
        section_id: &str,
        apply: impl FnOnce(&SkillsContent) -> SkillsContent,
    ) -> Self {
        match self.get(section_id).map(|section| &section.content) {
            Some(SectionContent::Skills(skills)) => {
                self.update_section_content(section_id, SectionContent::Skills(apply(skills)))
            }
            _ => self.clone(),
        }
    }

    fn items_of<T: ItemRecord>(&self, section_id: &str) -> Option<&[T]> {
        self.get(section_id)
            .and_then(|section| T::items(&section.content))
    }
}
