//! Persisted resume records.
//!
//! # Responsibility
//! - Define the durable shapes exchanged with the persistence gateway.
//! - Define the wire form `{ id, resume_id, type, title, content, order }`.
//!
//! # Invariants
//! - `order` is the only persisted positioning signal for sections.
//! - Every record is scoped to exactly one owner through its resume.

use crate::model::content::{ContentError, SectionContent};
use crate::model::section::{Section, SectionId, SectionKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable resume identifier.
pub type ResumeId = Uuid;

/// Authenticated owner identifier, supplied by the surrounding application.
pub type OwnerId = Uuid;

/// Resume document header as stored by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: ResumeId,
    #[serde(rename = "user_id")]
    pub owner_id: OwnerId,
    pub title: String,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms update timestamp; bumped by any section write.
    pub updated_at: i64,
}

/// One persisted section row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SectionRecordWire")]
pub struct SectionRecord {
    pub id: SectionId,
    pub resume_id: ResumeId,
    /// Serialized as `type` to match the storage schema naming.
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub title: String,
    pub content: SectionContent,
    pub order: i64,
}

impl SectionRecord {
    /// Builds a record for `section` at list position `order`.
    pub fn from_section(resume_id: ResumeId, section: &Section, order: i64) -> Self {
        Self {
            id: section.id.clone(),
            resume_id,
            kind: section.kind(),
            title: section.title.clone(),
            content: section.content.clone(),
            order,
        }
    }

    /// Converts back into an in-memory section.
    pub fn into_section(self) -> Section {
        Section::with_id(self.id, self.title, self.content)
    }
}

#[derive(Deserialize)]
struct SectionRecordWire {
    id: SectionId,
    resume_id: ResumeId,
    #[serde(rename = "type")]
    kind: SectionKind,
    title: String,
    content: serde_json::Value,
    order: i64,
}

impl TryFrom<SectionRecordWire> for SectionRecord {
    type Error = ContentError;

    fn try_from(value: SectionRecordWire) -> Result<Self, Self::Error> {
        Ok(Self {
            content: SectionContent::from_json(value.kind, value.content)?,
            id: value.id,
            resume_id: value.resume_id,
            kind: value.kind,
            title: value.title,
            order: value.order,
        })
    }
}

/// Position update for one section, as sent by reorder commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOrder {
    pub id: SectionId,
    pub order: i64,
}

#[cfg(test)]
mod tests {
    use super::SectionRecord;
    use crate::model::content::{ExperienceItem, SectionContent};
    use crate::model::section::{Section, SectionKind};
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn section_record_wire_shape_roundtrips() {
        let resume_id = Uuid::new_v4();
        let section = Section::with_id(
            "experience-1",
            "Work Experience",
            SectionContent::Experience(vec![ExperienceItem {
                id: "exp-1".to_string(),
                company: "Acme".to_string(),
                end_date: "Present".to_string(),
                ..ExperienceItem::default()
            }]),
        );
        let record = SectionRecord::from_section(resume_id, &section, 3);

        let wire = serde_json::to_value(&record).unwrap();
        assert_eq!(wire["type"], json!("experience"));
        assert_eq!(wire["order"], json!(3));
        assert_eq!(wire["content"][0]["company"], json!("Acme"));
        assert_eq!(wire["content"][0]["endDate"], json!("Present"));

        let decoded: SectionRecord = serde_json::from_value(wire).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.kind, SectionKind::Experience);
        assert_eq!(decoded.into_section(), section);
    }

    #[test]
    fn section_record_rejects_mismatched_content() {
        let wire = json!({
            "id": "skills-1",
            "resume_id": Uuid::new_v4(),
            "type": "skills",
            "title": "Skills",
            "content": [1, 2, 3],
            "order": 0
        });
        assert!(serde_json::from_value::<SectionRecord>(wire).is_err());
    }

    #[test]
    fn object_kinds_reject_array_content() {
        for kind in ["skills", "header"] {
            let wire = json!({
                "id": format!("{kind}-1"),
                "resume_id": Uuid::new_v4(),
                "type": kind,
                "title": "Section",
                "content": [],
                "order": 0
            });
            let err = serde_json::from_value::<SectionRecord>(wire).unwrap_err();
            assert!(err.to_string().contains("a JSON object"), "{kind}: {err}");
        }
    }
}
