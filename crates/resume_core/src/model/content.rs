//! Kind-specific section content records.
//!
//! # Responsibility
//! - Define typed content for every section kind (closed sum type).
//! - Provide the JSON codec used by the persisted `content` column.
//!
//! # Invariants
//! - JSON uses camelCase keys and round-trips exactly for every kind.
//! - Dates are free text; nothing here parses or normalizes them.
//! - Skill lists keep duplicates and order as entered.

use crate::model::section::{ItemId, SectionKind};
use serde::de::{self, Unexpected};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ContentResult<T> = Result<T, ContentError>;

/// Error raised when JSON content does not match the shape of its kind.
#[derive(Debug)]
pub struct ContentError {
    pub kind: SectionKind,
    pub source: serde_json::Error,
}

impl Display for ContentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid `{}` section content: {}", self.kind, self.source)
    }
}

impl Error for ContentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Contact block at the top of a resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderContent {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub location: String,
    pub summary: String,
}

/// Editable field of [`HeaderContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    FullName,
    Title,
    Email,
    Phone,
    Website,
    Location,
    Summary,
}

impl HeaderContent {
    /// Reads one field.
    pub fn field(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::FullName => &self.full_name,
            HeaderField::Title => &self.title,
            HeaderField::Email => &self.email,
            HeaderField::Phone => &self.phone,
            HeaderField::Website => &self.website,
            HeaderField::Location => &self.location,
            HeaderField::Summary => &self.summary,
        }
    }

    /// Replaces one field.
    pub fn set_field(&mut self, field: HeaderField, value: String) {
        let slot = match field {
            HeaderField::FullName => &mut self.full_name,
            HeaderField::Title => &mut self.title,
            HeaderField::Email => &mut self.email,
            HeaderField::Phone => &mut self.phone,
            HeaderField::Website => &mut self.website,
            HeaderField::Location => &mut self.location,
            HeaderField::Summary => &mut self.summary,
        };
        *slot = value;
    }
}

/// Behavior shared by list-shaped section items.
///
/// Implementors map one-to-one onto a list-shaped [`SectionKind`], which lets
/// generic form operations address items by id regardless of kind.
pub trait ItemRecord: Clone + PartialEq {
    /// Field selector used by `update_item`.
    type Field: Copy;

    /// Section kind whose content is a list of this item.
    const KIND: SectionKind;
    /// Prefix of freshly generated item ids.
    const ID_PREFIX: &'static str;

    /// Creates an item with blank fields.
    fn blank(id: ItemId) -> Self;
    /// Stable item id.
    fn id(&self) -> &str;
    /// Reads one field.
    fn field(&self, field: Self::Field) -> &str;
    /// Replaces one field.
    fn set_field(&mut self, field: Self::Field, value: String);
    /// Borrows the item list when `content` has this item's kind.
    fn items(content: &SectionContent) -> Option<&[Self]>;
    /// Wraps an item list into section content.
    fn into_content(items: Vec<Self>) -> SectionContent;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    pub id: ItemId,
    pub institution: String,
    pub degree: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Institution,
    Degree,
    Location,
    StartDate,
    EndDate,
    Description,
}

impl ItemRecord for EducationItem {
    type Field = EducationField;
    const KIND: SectionKind = SectionKind::Education;
    const ID_PREFIX: &'static str = "edu";

    fn blank(id: ItemId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: EducationField) -> &str {
        match field {
            EducationField::Institution => &self.institution,
            EducationField::Degree => &self.degree,
            EducationField::Location => &self.location,
            EducationField::StartDate => &self.start_date,
            EducationField::EndDate => &self.end_date,
            EducationField::Description => &self.description,
        }
    }

    fn set_field(&mut self, field: EducationField, value: String) {
        let slot = match field {
            EducationField::Institution => &mut self.institution,
            EducationField::Degree => &mut self.degree,
            EducationField::Location => &mut self.location,
            EducationField::StartDate => &mut self.start_date,
            EducationField::EndDate => &mut self.end_date,
            EducationField::Description => &mut self.description,
        };
        *slot = value;
    }

    fn items(content: &SectionContent) -> Option<&[Self]> {
        match content {
            SectionContent::Education(items) => Some(items),
            _ => None,
        }
    }

    fn into_content(items: Vec<Self>) -> SectionContent {
        SectionContent::Education(items)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    pub id: ItemId,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Company,
    Position,
    Location,
    StartDate,
    EndDate,
    Description,
}

impl ItemRecord for ExperienceItem {
    type Field = ExperienceField;
    const KIND: SectionKind = SectionKind::Experience;
    const ID_PREFIX: &'static str = "exp";

    fn blank(id: ItemId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: ExperienceField) -> &str {
        match field {
            ExperienceField::Company => &self.company,
            ExperienceField::Position => &self.position,
            ExperienceField::Location => &self.location,
            ExperienceField::StartDate => &self.start_date,
            ExperienceField::EndDate => &self.end_date,
            ExperienceField::Description => &self.description,
        }
    }

    fn set_field(&mut self, field: ExperienceField, value: String) {
        let slot = match field {
            ExperienceField::Company => &mut self.company,
            ExperienceField::Position => &mut self.position,
            ExperienceField::Location => &mut self.location,
            ExperienceField::StartDate => &mut self.start_date,
            ExperienceField::EndDate => &mut self.end_date,
            ExperienceField::Description => &mut self.description,
        };
        *slot = value;
    }

    fn items(content: &SectionContent) -> Option<&[Self]> {
        match content {
            SectionContent::Experience(items) => Some(items),
            _ => None,
        }
    }

    fn into_content(items: Vec<Self>) -> SectionContent {
        SectionContent::Experience(items)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectItem {
    pub id: ItemId,
    pub name: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub link: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Name,
    Role,
    StartDate,
    EndDate,
    Link,
    Description,
}

impl ItemRecord for ProjectItem {
    type Field = ProjectField;
    const KIND: SectionKind = SectionKind::Projects;
    const ID_PREFIX: &'static str = "proj";

    fn blank(id: ItemId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: ProjectField) -> &str {
        match field {
            ProjectField::Name => &self.name,
            ProjectField::Role => &self.role,
            ProjectField::StartDate => &self.start_date,
            ProjectField::EndDate => &self.end_date,
            ProjectField::Link => &self.link,
            ProjectField::Description => &self.description,
        }
    }

    fn set_field(&mut self, field: ProjectField, value: String) {
        let slot = match field {
            ProjectField::Name => &mut self.name,
            ProjectField::Role => &mut self.role,
            ProjectField::StartDate => &mut self.start_date,
            ProjectField::EndDate => &mut self.end_date,
            ProjectField::Link => &mut self.link,
            ProjectField::Description => &mut self.description,
        };
        *slot = value;
    }

    fn items(content: &SectionContent) -> Option<&[Self]> {
        match content {
            SectionContent::Projects(items) => Some(items),
            _ => None,
        }
    }

    fn into_content(items: Vec<Self>) -> SectionContent {
        SectionContent::Projects(items)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AchievementItem {
    pub id: ItemId,
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementField {
    Title,
    Issuer,
    Date,
    Description,
}

impl ItemRecord for AchievementItem {
    type Field = AchievementField;
    const KIND: SectionKind = SectionKind::Achievements;
    const ID_PREFIX: &'static str = "ach";

    fn blank(id: ItemId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, field: AchievementField) -> &str {
        match field {
            AchievementField::Title => &self.title,
            AchievementField::Issuer => &self.issuer,
            AchievementField::Date => &self.date,
            AchievementField::Description => &self.description,
        }
    }

    fn set_field(&mut self, field: AchievementField, value: String) {
        let slot = match field {
            AchievementField::Title => &mut self.title,
            AchievementField::Issuer => &mut self.issuer,
            AchievementField::Date => &mut self.date,
            AchievementField::Description => &mut self.description,
        };
        *slot = value;
    }

    fn items(content: &SectionContent) -> Option<&[Self]> {
        match content {
            SectionContent::Achievements(items) => Some(items),
            _ => None,
        }
    }

    fn into_content(items: Vec<Self>) -> SectionContent {
        SectionContent::Achievements(items)
    }
}

/// Named group of free-text skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub id: ItemId,
    pub name: String,
    pub skills: Vec<String>,
}

/// Content of a skills section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsContent {
    pub categories: Vec<SkillCategory>,
}

impl SkillsContent {
    pub fn category(&self, id: &str) -> Option<&SkillCategory> {
        self.categories.iter().find(|category| category.id == id)
    }
}

/// Kind-specific section payload.
///
/// Serializes as the bare inner value; the kind travels next to it (the
/// persisted `type` column), so decoding goes through [`SectionContent::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionContent {
    Header(HeaderContent),
    Education(Vec<EducationItem>),
    Experience(Vec<ExperienceItem>),
    Skills(SkillsContent),
    Projects(Vec<ProjectItem>),
    Achievements(Vec<AchievementItem>),
}

impl SectionContent {
    /// Kind-appropriate empty value: `[]`, `{categories: []}` or a blank header.
    pub fn empty(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Header => Self::Header(HeaderContent::default()),
            SectionKind::Education => Self::Education(Vec::new()),
            SectionKind::Experience => Self::Experience(Vec::new()),
            SectionKind::Skills => Self::Skills(SkillsContent::default()),
            SectionKind::Projects => Self::Projects(Vec::new()),
            SectionKind::Achievements => Self::Achievements(Vec::new()),
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Self::Header(_) => SectionKind::Header,
            Self::Education(_) => SectionKind::Education,
            Self::Experience(_) => SectionKind::Experience,
            Self::Skills(_) => SectionKind::Skills,
            Self::Projects(_) => SectionKind::Projects,
            Self::Achievements(_) => SectionKind::Achievements,
        }
    }

    /// Number of list items, or skill categories for skills; header counts as 1.
    pub fn item_count(&self) -> usize {
        match self {
            Self::Header(_) => 1,
            Self::Education(items) => items.len(),
            Self::Experience(items) => items.len(),
            Self::Skills(skills) => skills.categories.len(),
            Self::Projects(items) => items.len(),
            Self::Achievements(items) => items.len(),
        }
    }

    /// Decodes content JSON for a known kind.
    ///
    /// Records must be JSON objects. Serde would otherwise fill a struct from
    /// an array by position.
    pub fn from_json(kind: SectionKind, value: serde_json::Value) -> ContentResult<Self> {
        let wrap = |source| ContentError { kind, source };
        ensure_record_shape(kind, &value).map_err(wrap)?;
        let content = match kind {
            SectionKind::Header => Self::Header(serde_json::from_value(value).map_err(wrap)?),
            SectionKind::Education => {
                Self::Education(serde_json::from_value(value).map_err(wrap)?)
            }
            SectionKind::Experience => {
                Self::Experience(serde_json::from_value(value).map_err(wrap)?)
            }
            SectionKind::Skills => Self::Skills(serde_json::from_value(value).map_err(wrap)?),
            SectionKind::Projects => Self::Projects(serde_json::from_value(value).map_err(wrap)?),
            SectionKind::Achievements => {
                Self::Achievements(serde_json::from_value(value).map_err(wrap)?)
            }
        };
        Ok(content)
    }

    /// Decodes content JSON text for a known kind.
    pub fn from_json_str(kind: SectionKind, text: &str) -> ContentResult<Self> {
        let value = serde_json::from_str(text).map_err(|source| ContentError { kind, source })?;
        Self::from_json(kind, value)
    }

    /// Encodes content as compact JSON text.
    pub fn to_json_string(&self) -> ContentResult<String> {
        serde_json::to_string(self).map_err(|source| ContentError {
            kind: self.kind(),
            source,
        })
    }
}

fn ensure_record_shape(
    kind: SectionKind,
    value: &serde_json::Value,
) -> Result<(), serde_json::Error> {
    if kind.is_list_shaped() {
        match value {
            serde_json::Value::Array(items) => items.iter().try_for_each(ensure_object),
            // Non-arrays fail in the typed decode with serde's own message.
            _ => Ok(()),
        }
    } else {
        ensure_object(value)?;
        match value.get("categories") {
            Some(serde_json::Value::Array(categories)) => {
                categories.iter().try_for_each(ensure_object)
            }
            _ => Ok(()),
        }
    }
}

fn ensure_object(value: &serde_json::Value) -> Result<(), serde_json::Error> {
    let unexpected = match value {
        serde_json::Value::Object(_) => return Ok(()),
        serde_json::Value::Array(_) => Unexpected::Seq,
        serde_json::Value::Null => Unexpected::Unit,
        serde_json::Value::Bool(flag) => Unexpected::Bool(*flag),
        serde_json::Value::Number(_) => Unexpected::Other("number"),
        serde_json::Value::String(text) => Unexpected::Str(text),
    };
    Err(<serde_json::Error as de::Error>::invalid_type(
        unexpected,
        &"a JSON object",
    ))
}

#[cfg(test)]
mod tests {
    use super::{
        ExperienceField, ExperienceItem, HeaderContent, ItemRecord, SectionContent,
        SkillCategory, SkillsContent,
    };
    use crate::model::section::SectionKind;
    use serde_json::json;

    #[test]
    fn empty_content_matches_kind_shape() {
        assert_eq!(
            serde_json::to_value(SectionContent::empty(SectionKind::Projects)).unwrap(),
            json!([])
        );
        assert_eq!(
            serde_json::to_value(SectionContent::empty(SectionKind::Skills)).unwrap(),
            json!({ "categories": [] })
        );
        let header = serde_json::to_value(SectionContent::empty(SectionKind::Header)).unwrap();
        assert_eq!(header["fullName"], json!(""));
    }

    #[test]
    fn header_uses_camel_case_keys() {
        let header = HeaderContent {
            full_name: "Ada Lovelace".to_string(),
            ..HeaderContent::default()
        };
        let text = SectionContent::Header(header.clone())
            .to_json_string()
            .unwrap();
        assert!(text.contains("\"fullName\":\"Ada Lovelace\""));
        let decoded = SectionContent::from_json_str(SectionKind::Header, &text).unwrap();
        assert_eq!(decoded, SectionContent::Header(header));
    }

    #[test]
    fn skills_keep_duplicates_and_order() {
        let skills = SectionContent::Skills(SkillsContent {
            categories: vec![SkillCategory {
                id: "cat-1".to_string(),
                name: "Languages".to_string(),
                skills: vec!["Rust".to_string(), "Go".to_string(), "Rust".to_string()],
            }],
        });
        let text = skills.to_json_string().unwrap();
        let decoded = SectionContent::from_json_str(SectionKind::Skills, &text).unwrap();
        assert_eq!(decoded, skills);
    }

    #[test]
    fn decoding_with_wrong_kind_fails() {
        let err = SectionContent::from_json_str(SectionKind::Experience, r#"{"categories":[]}"#)
            .unwrap_err();
        assert_eq!(err.kind, SectionKind::Experience);
        assert!(err.to_string().contains("experience"));
    }

    #[test]
    fn positional_arrays_are_not_records() {
        for (kind, value) in [
            (SectionKind::Header, json!(["Ada", "Engineer"])),
            (SectionKind::Header, json!([])),
            (SectionKind::Skills, json!([])),
            (SectionKind::Skills, json!({ "categories": [["cat-1", "Languages", []]] })),
            (SectionKind::Education, json!([["edu-1", "MIT"]])),
        ] {
            let err = SectionContent::from_json(kind, value.clone()).unwrap_err();
            assert_eq!(err.kind, kind, "{value}");
            assert!(err.to_string().contains("a JSON object"), "{err}");
        }
        assert_eq!(
            SectionContent::from_json(SectionKind::Projects, json!([])).unwrap(),
            SectionContent::Projects(Vec::new())
        );
    }

    #[test]
    fn item_fields_are_addressable() {
        let mut item = ExperienceItem::blank("exp-1".to_string());
        item.set_field(ExperienceField::EndDate, "Present".to_string());
        assert_eq!(item.field(ExperienceField::EndDate), "Present");
        assert_eq!(item.field(ExperienceField::Company), "");
        assert_eq!(item.id(), "exp-1");
    }
}
