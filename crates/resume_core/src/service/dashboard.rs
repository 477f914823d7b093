//! Resume list for one owner.
//!
//! # Responsibility
//! - Keep the owner's resume list current after create, duplicate, rename
//!   and delete.
//! - Turn every collaborator outcome into a user notice.
//!
//! # Invariants
//! - A failed call leaves the list as it was.
//! - Deletion is gated by a confirmation prompt.

use crate::editor::container::ConfirmPrompt;
use crate::editor::notice::Notice;
use crate::model::resume::{OwnerId, ResumeId, ResumeRecord};
use crate::repo::resume_repo::ResumeRepository;
use crate::service::resume_service::{ResumeService, ResumeServiceError};
use log::warn;

pub const LIST_FAILED_TITLE: &str = "Failed to load resumes";
pub const CREATED_TITLE: &str = "Resume created";
pub const CREATE_FAILED_TITLE: &str = "Failed to create resume";
pub const DUPLICATED_TITLE: &str = "Resume duplicated!";
pub const DUPLICATE_FAILED_TITLE: &str = "Failed to duplicate resume";
pub const RENAME_FAILED_TITLE: &str = "Failed to rename resume";
pub const DELETED_TITLE: &str = "Resume deleted";
pub const DELETE_FAILED_TITLE: &str = "Failed to delete resume";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this resume?";

/// Owner-scoped resume list with pending notices.
#[derive(Debug, Clone)]
pub struct Dashboard {
    owner: OwnerId,
    resumes: Vec<ResumeRecord>,
    notices: Vec<Notice>,
}

impl Dashboard {
    /// Loads the owner's resumes. A failed load gives an empty list and an
    /// error notice.
    pub fn load<R: ResumeRepository>(service: &ResumeService<R>, owner: OwnerId) -> Self {
        let mut dashboard = Self {
            owner,
            resumes: Vec::new(),
            notices: Vec::new(),
        };
        dashboard.refresh(service);
        dashboard
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Resumes, most recently updated first.
    pub fn resumes(&self) -> &[ResumeRecord] {
        &self.resumes
    }

    /// Reloads the list. Returns whether it succeeded.
    pub fn refresh<R: ResumeRepository>(&mut self, service: &ResumeService<R>) -> bool {
        match service.list_resumes(self.owner) {
            Ok(resumes) => {
                self.resumes = resumes;
                true
            }
            Err(err) => {
                self.fail("list", LIST_FAILED_TITLE, err);
                false
            }
        }
    }

    pub fn create<R: ResumeRepository>(
        &mut self,
        service: &ResumeService<R>,
        title: &str,
    ) -> Option<ResumeRecord> {
        match service.create_resume(self.owner, title) {
            Ok(resume) => {
                self.notices.push(Notice::success(CREATED_TITLE));
                self.refresh(service);
                Some(resume)
            }
            Err(err) => {
                self.fail("create", CREATE_FAILED_TITLE, err);
                None
            }
        }
    }

    pub fn duplicate<R: ResumeRepository>(
        &mut self,
        service: &ResumeService<R>,
        id: ResumeId,
    ) -> Option<ResumeRecord> {
        match service.duplicate_resume(self.owner, id) {
            Ok(copy) => {
                self.notices.push(Notice::success(DUPLICATED_TITLE));
                self.refresh(service);
                Some(copy)
            }
            Err(err) => {
                self.fail("duplicate", DUPLICATE_FAILED_TITLE, err);
                None
            }
        }
    }

    pub fn rename<R: ResumeRepository>(
        &mut self,
        service: &ResumeService<R>,
        id: ResumeId,
        title: &str,
    ) -> bool {
        match service.rename_resume(self.owner, id, title) {
            Ok(()) => {
                self.refresh(service);
                true
            }
            Err(err) => {
                self.fail("rename", RENAME_FAILED_TITLE, err);
                false
            }
        }
    }

    /// Deletes resume `id` after `prompt` confirms. Returns whether it was deleted.
    pub fn delete<R: ResumeRepository>(
        &mut self,
        service: &ResumeService<R>,
        id: ResumeId,
        prompt: &mut impl ConfirmPrompt,
    ) -> bool {
        if !prompt.confirm(DELETE_PROMPT) {
            return false;
        }
        match service.delete_resume(self.owner, id) {
            Ok(()) => {
                self.resumes.retain(|resume| resume.id != id);
                self.notices.push(Notice::success(DELETED_TITLE));
                true
            }
            Err(err) => {
                self.fail("delete", DELETE_FAILED_TITLE, err);
                false
            }
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drains pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn fail(&mut self, action: &str, title: &str, err: ResumeServiceError) {
        warn!("event=dashboard_{action} module=service status=error error={err}");
        self.notices.push(Notice::error(title, err.to_string()));
    }
}
