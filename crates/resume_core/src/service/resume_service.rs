//! Resume use-case service.
//!
//! # Responsibility
//! - Load stored resumes into editor documents and save them back.
//! - Translate list position to persisted `order` on every load and commit.
//!
//! # Invariants
//! - Loading sorts by `order`, ties broken by section id.
//! - Saving writes `order = index` for every section.
//! - The service never mutates a document it is given.

use crate::editor::document::Document;
use crate::editor::seed::starter_document;
use crate::model::resume::{OwnerId, ResumeId, ResumeRecord, SectionOrder, SectionRecord};
use crate::repo::resume_repo::{RepoError, ResumeRepository};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ResumeServiceResult<T> = Result<T, ResumeServiceError>;

/// Service error for resume use-cases.
#[derive(Debug)]
pub enum ResumeServiceError {
    /// Target resume does not exist for this owner.
    ResumeNotFound(ResumeId),
    /// Target section is not part of the document being saved.
    SectionNotInDocument(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ResumeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResumeNotFound(id) => write!(f, "resume not found: {id}"),
            Self::SectionNotInDocument(id) => write!(f, "section `{id}` is not in the document"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ResumeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ResumeServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ResumeNotFound(id) => Self::ResumeNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Stored resume opened for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedResume {
    pub resume: ResumeRecord,
    pub document: Document,
    /// True when nothing was stored and `document` is the starter document.
    pub is_starter: bool,
}

/// Resume service facade over repository implementations.
pub struct ResumeService<R: ResumeRepository> {
    repo: R,
}

impl<R: ResumeRepository> ResumeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_resume(&self, owner: OwnerId, title: &str) -> ResumeServiceResult<ResumeRecord> {
        Ok(self.repo.create_resume(owner, title)?)
    }

    /// Lists resumes, most recently updated first.
    pub fn list_resumes(&self, owner: OwnerId) -> ResumeServiceResult<Vec<ResumeRecord>> {
        Ok(self.repo.list_resumes(owner)?)
    }

    pub fn get_resume(&self, owner: OwnerId, id: ResumeId) -> ResumeServiceResult<ResumeRecord> {
        self.repo
            .get_resume(owner, id)?
            .ok_or(ResumeServiceError::ResumeNotFound(id))
    }

    /// Loads a resume and its sections as an editor document.
    ///
    /// A resume without stored sections opens as the starter document, which
    /// is not persisted until the first save.
    pub fn open_resume(&self, owner: OwnerId, id: ResumeId) -> ResumeServiceResult<OpenedResume> {
        let resume = self.get_resume(owner, id)?;
        let records = self.repo.list_sections(owner, id)?;
        let is_starter = records.is_empty();
        let document = if is_starter {
            starter_document()
        } else {
            document_from_records(records)
        };

        info!(
            "event=resume_open module=service status=ok sections={} starter={is_starter}",
            document.len()
        );
        Ok(OpenedResume {
            resume,
            document,
            is_starter,
        })
    }

    /// Persists the whole document: every section with `order = index`,
    /// stored sections missing from the document are deleted.
    pub fn save_document(
        &self,
        owner: OwnerId,
        id: ResumeId,
        document: &Document,
    ) -> ResumeServiceResult<()> {
        self.repo
            .sync_sections(owner, id, &document_to_records(id, document))?;
        info!(
            "event=document_save module=service status=ok sections={}",
            document.len()
        );
        Ok(())
    }

    /// Persists one section of `document` at its current index.
    pub fn save_section(
        &self,
        owner: OwnerId,
        id: ResumeId,
        document: &Document,
        section_id: &str,
    ) -> ResumeServiceResult<()> {
        let index = document
            .index_of(section_id)
            .ok_or_else(|| ResumeServiceError::SectionNotInDocument(section_id.to_string()))?;
        let record = SectionRecord::from_section(id, &document.sections()[index], index as i64);
        Ok(self.repo.upsert_section(owner, &record)?)
    }

    pub fn delete_section(
        &self,
        owner: OwnerId,
        id: ResumeId,
        section_id: &str,
    ) -> ResumeServiceResult<()> {
        Ok(self.repo.delete_section(owner, id, section_id)?)
    }

    /// Commits the document's current section order.
    pub fn commit_order(
        &self,
        owner: OwnerId,
        id: ResumeId,
        document: &Document,
    ) -> ResumeServiceResult<()> {
        Ok(self
            .repo
            .reorder_sections(owner, id, &section_orders(document))?)
    }

    pub fn rename_resume(&self, owner: OwnerId, id: ResumeId, title: &str) -> ResumeServiceResult<()> {
        Ok(self.repo.rename_resume(owner, id, title)?)
    }

    pub fn duplicate_resume(&self, owner: OwnerId, id: ResumeId) -> ResumeServiceResult<ResumeRecord> {
        Ok(self.repo.duplicate_resume(owner, id)?)
    }

    pub fn delete_resume(&self, owner: OwnerId, id: ResumeId) -> ResumeServiceResult<()> {
        Ok(self.repo.delete_resume(owner, id)?)
    }
}

/// Persisted records for `document`, with `order = index`.
pub fn document_to_records(resume_id: ResumeId, document: &Document) -> Vec<SectionRecord> {
    document
        .iter()
        .enumerate()
        .map(|(index, section)| SectionRecord::from_section(resume_id, section, index as i64))
        .collect()
}

/// Builds a document from persisted records in ascending `order`.
pub fn document_from_records(mut records: Vec<SectionRecord>) -> Document {
    records.sort_by(|left, right| {
        left.order
            .cmp(&right.order)
            .then_with(|| left.id.cmp(&right.id))
    });
    records.into_iter().map(SectionRecord::into_section).collect()
}

/// Position updates for the current section order.
pub fn section_orders(document: &Document) -> Vec<SectionOrder> {
    document
        .iter()
        .enumerate()
        .map(|(index, section)| SectionOrder {
            id: section.id.clone(),
            order: index as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{document_from_records, document_to_records, section_orders};
    use crate::editor::seed::sample_document;
    use uuid::Uuid;

    #[test]
    fn records_roundtrip_through_order() {
        let document = sample_document();
        let mut records = document_to_records(Uuid::new_v4(), &document);
        records.reverse();
        assert_eq!(document_from_records(records), document);
    }

    #[test]
    fn ties_break_by_section_id() {
        let document = sample_document();
        let mut records = document_to_records(Uuid::new_v4(), &document);
        for record in &mut records {
            record.order = 0;
        }
        let ids = document_from_records(records).ids().join(",");
        assert_eq!(
            ids,
            "achievements-1,education-1,experience-1,header-1,projects-1,skills-1"
        );
    }

    #[test]
    fn orders_follow_index() {
        let document = sample_document().move_to_end("header-1");
        let orders = section_orders(&document);
        assert_eq!(orders.last().map(|order| order.id.as_str()), Some("header-1"));
        assert_eq!(orders.last().map(|order| order.order), Some(5));
    }
}
