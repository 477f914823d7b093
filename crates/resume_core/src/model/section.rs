//! Section domain model.
//!
//! # Responsibility
//! - Define the unit of resume document structure (`Section`).
//! - Own the closed set of section kinds and their defaults.
//!
//! # Invariants
//! - A section's kind is derived from its content variant, so it cannot
//!   change after creation without replacing the whole section.
//! - `id` is opaque and stable for the section lifetime.

use crate::model::content::SectionContent;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque section identifier, unique within one document.
pub type SectionId = String;

/// Opaque identifier of one list item or skill category inside a section.
pub type ItemId = String;

/// Generates a fresh opaque id of the form `{prefix}-{uuid}`.
///
/// The prefix only aids debugging; uniqueness comes from the v4 suffix.
pub fn fresh_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Fixed category of a section; determines content shape and form UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Education,
    Experience,
    Skills,
    Projects,
    Achievements,
}

impl SectionKind {
    /// All kinds in the order the editor offers them.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Header,
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Achievements,
    ];

    /// Stable wire/storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Achievements => "achievements",
        }
    }

    /// Parses a stable wire/storage name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "header" => Some(Self::Header),
            "education" => Some(Self::Education),
            "experience" => Some(Self::Experience),
            "skills" => Some(Self::Skills),
            "projects" => Some(Self::Projects),
            "achievements" => Some(Self::Achievements),
            _ => None,
        }
    }

    /// Title given to a freshly added section of this kind.
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Header => "Personal Details",
            Self::Education => "Education",
            Self::Experience => "Work Experience",
            Self::Skills => "Skills",
            Self::Projects => "Projects",
            Self::Achievements => "Achievements",
        }
    }

    /// Whether content is an ordered item list (as opposed to one object).
    pub fn is_list_shaped(self) -> bool {
        !matches!(self, Self::Header | Self::Skills)
    }

    /// Whether the editor offers "duplicate" for this kind.
    ///
    /// A document carries at most one header by convention.
    pub fn is_duplicable(self) -> bool {
        self != Self::Header
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One titled, reorderable block of a resume document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Stable opaque id.
    pub id: SectionId,
    /// User-editable display label, independent of kind.
    pub title: String,
    /// Kind-specific payload. The variant is the section kind.
    pub content: SectionContent,
}

impl Section {
    /// Creates an empty section of `kind` with a fresh id and default title.
    pub fn new(kind: SectionKind) -> Self {
        Self {
            id: fresh_id(kind.as_str()),
            title: kind.default_title().to_string(),
            content: SectionContent::empty(kind),
        }
    }

    /// Creates a section with caller-provided identity.
    ///
    /// Used by load paths where the id already exists in storage.
    pub fn with_id(
        id: impl Into<SectionId>,
        title: impl Into<String>,
        content: SectionContent,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content,
        }
    }

    /// Section kind, derived from the content variant.
    pub fn kind(&self) -> SectionKind {
        self.content.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::{fresh_id, Section, SectionKind};

    #[test]
    fn kind_names_roundtrip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(SectionKind::parse("summary"), None);
    }

    #[test]
    fn fresh_ids_carry_prefix_and_differ() {
        let first = fresh_id("exp");
        let second = fresh_id("exp");
        assert!(first.starts_with("exp-"));
        assert_ne!(first, second);
    }

    #[test]
    fn new_section_uses_kind_defaults() {
        let section = Section::new(SectionKind::Experience);
        assert_eq!(section.kind(), SectionKind::Experience);
        assert_eq!(section.title, "Work Experience");
        assert!(section.id.starts_with("experience-"));
        assert_eq!(section.content.item_count(), 0);
    }

    #[test]
    fn only_header_is_not_duplicable() {
        assert!(!SectionKind::Header.is_duplicable());
        assert!(SectionKind::Skills.is_duplicable());
        assert!(!SectionKind::Skills.is_list_shaped());
        assert!(SectionKind::Projects.is_list_shaped());
    }
}
