//! One open editing session over a stored resume.
//!
//! # Responsibility
//! - Hold the live document plus UI-only state (drag gesture, notices).
//! - Route load, save, reorder commits, section deletes and export through
//!   their collaborators and turn every outcome into a user notice.
//!
//! # Invariants
//! - A failed collaborator call never modifies the live document.
//! - A failed collaborator call surfaces as an error notice, never a panic.
//! - `is_dirty` compares the live document with the last saved one.

use crate::editor::container::{confirm_and_remove, section_chrome, ConfirmPrompt, SectionChrome};
use crate::editor::document::Document;
use crate::editor::drag::{DragController, DropTarget};
use crate::editor::notice::Notice;
use crate::export::{ExportAdapter, ExportArtifact};
use crate::model::resume::{OwnerId, ResumeId, ResumeRecord};
use crate::model::section::SectionId;
use crate::preview::layout::{layout_preview, LayoutConfig, PreviewLayout};
use crate::preview::render::{render_preview, Preview};
use crate::repo::resume_repo::ResumeRepository;
use crate::service::resume_service::{OpenedResume, ResumeService};
use log::{info, warn};

pub const SAVE_OK_TITLE: &str = "Resume saved!";
pub const SAVE_FAILED_TITLE: &str = "Failed to save section";
pub const EXPORT_OK_TITLE: &str = "Resume downloaded!";
pub const EXPORT_FAILED_TITLE: &str = "Error downloading resume";
pub const LOAD_FAILED_TITLE: &str = "Failed to load resume";
pub const REORDER_FAILED_TITLE: &str = "Failed to reorder sections";
pub const SECTION_DELETED_TITLE: &str = "Section deleted";
pub const SECTION_DELETE_FAILED_TITLE: &str = "Failed to delete section";

/// Editor state for one resume.
#[derive(Debug, Clone)]
pub struct EditorSession {
    owner: OwnerId,
    resume: ResumeRecord,
    document: Document,
    saved: Document,
    drag: DragController,
    layout_config: LayoutConfig,
    notices: Vec<Notice>,
}

impl EditorSession {
    /// Starts a session on an opened resume.
    ///
    /// A starter document counts as unsaved.
    pub fn new(owner: OwnerId, opened: OpenedResume) -> Self {
        let saved = if opened.is_starter {
            Document::new()
        } else {
            opened.document.clone()
        };
        Self {
            owner,
            resume: opened.resume,
            document: opened.document,
            saved,
            drag: DragController::new(),
            layout_config: LayoutConfig::default(),
            notices: Vec::new(),
        }
    }

    /// Loads resume `id` and starts a session on it.
    ///
    /// # Errors
    /// - The error notice to show when the resume cannot be loaded.
    pub fn open<R: ResumeRepository>(
        service: &ResumeService<R>,
        owner: OwnerId,
        id: ResumeId,
    ) -> Result<Self, Notice> {
        match service.open_resume(owner, id) {
            Ok(opened) => Ok(Self::new(owner, opened)),
            Err(err) => {
                warn!("event=session_open module=service status=error error={err}");
                Err(Notice::error(LOAD_FAILED_TITLE, err.to_string()))
            }
        }
    }

    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout_config = config;
        self
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn resume(&self) -> &ResumeRecord {
        &self.resume
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn is_dirty(&self) -> bool {
        self.document != self.saved
    }

    /// Replaces the live document with the result of one document operation.
    pub fn apply(&mut self, edit: impl FnOnce(&Document) -> Document) {
        self.document = edit(&self.document);
    }

    pub fn drag_begin(&mut self, id: impl Into<SectionId>) {
        self.drag.begin(id);
    }

    pub fn drag_over(&mut self, target: DropTarget) {
        self.drag.drag_over(target);
    }

    /// Drops the dragged section and applies the resulting reorder.
    pub fn drag_end(&mut self) {
        self.document = self.drag.end(&self.document);
    }

    pub fn drag_cancel(&mut self) {
        self.drag.cancel();
    }

    pub fn chrome(&self) -> Vec<SectionChrome> {
        section_chrome(&self.document, &self.drag)
    }

    /// Deletes section `id` from the live document only, if `prompt` confirms.
    /// Returns whether it was removed.
    pub fn request_delete(&mut self, id: &str, prompt: &mut impl ConfirmPrompt) -> bool {
        let next = confirm_and_remove(&self.document, id, prompt);
        let removed = next.len() != self.document.len();
        self.document = next;
        removed
    }

    pub fn preview(&self) -> Preview {
        render_preview(&self.document)
    }

    pub fn layout(&self) -> PreviewLayout {
        layout_preview(&self.preview(), &self.layout_config)
    }

    /// Saves the live document. Returns whether the save succeeded.
    pub fn save<R: ResumeRepository>(&mut self, service: &ResumeService<R>) -> bool {
        match service.save_document(self.owner, self.resume.id, &self.document) {
            Ok(()) => {
                self.saved = self.document.clone();
                match service.get_resume(self.owner, self.resume.id) {
                    Ok(resume) => self.resume = resume,
                    Err(err) => warn!(
                        "event=session_reload module=service status=error error={err}"
                    ),
                }
                self.notices.push(Notice::success(SAVE_OK_TITLE));
                true
            }
            Err(err) => {
                warn!("event=session_save module=service status=error error={err}");
                self.notices
                    .push(Notice::error(SAVE_FAILED_TITLE, err.to_string()));
                false
            }
        }
    }

    /// Deletes section `id` after `prompt` confirms, removing the stored copy
    /// first when one exists. Returns whether the section was removed.
    ///
    /// A failed storage delete keeps the section and records an error notice.
    pub fn delete_section<R: ResumeRepository>(
        &mut self,
        service: &ResumeService<R>,
        id: &str,
        prompt: &mut impl ConfirmPrompt,
    ) -> bool {
        let next = confirm_and_remove(&self.document, id, prompt);
        if next.len() == self.document.len() {
            return false;
        }
        if self.saved.get(id).is_some() {
            if let Err(err) = service.delete_section(self.owner, self.resume.id, id) {
                warn!("event=session_section_delete module=service status=error error={err}");
                self.notices
                    .push(Notice::error(SECTION_DELETE_FAILED_TITLE, err.to_string()));
                return false;
            }
            self.saved = self.saved.remove_section(id);
            self.notices.push(Notice::success(SECTION_DELETED_TITLE));
        }
        self.document = next;
        true
    }

    /// Persists the live section order for every stored section.
    ///
    /// Sections not saved yet are skipped; they get their order on save.
    pub fn commit_order<R: ResumeRepository>(&mut self, service: &ResumeService<R>) -> bool {
        let persisted: Document = self
            .document
            .iter()
            .filter_map(|section| self.saved.get(&section.id).cloned())
            .collect();
        match service.commit_order(self.owner, self.resume.id, &persisted) {
            Ok(()) => {
                self.saved = persisted;
                true
            }
            Err(err) => {
                warn!("event=session_reorder module=service status=error error={err}");
                self.notices
                    .push(Notice::error(REORDER_FAILED_TITLE, err.to_string()));
                false
            }
        }
    }

    /// Exports the current preview. Returns the artifact on success.
    pub fn export(&mut self, exporter: &mut impl ExportAdapter) -> Option<ExportArtifact> {
        match exporter.export(&self.layout()) {
            Ok(artifact) => {
                info!(
                    "event=session_export module=service status=ok bytes={}",
                    artifact.byte_len
                );
                self.notices.push(Notice::success(EXPORT_OK_TITLE));
                Some(artifact)
            }
            Err(err) => {
                warn!("event=session_export module=service status=error error={err}");
                self.notices
                    .push(Notice::error(EXPORT_FAILED_TITLE, err.to_string()));
                None
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
}
