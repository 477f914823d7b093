//! Core document model for the resume editor.
//! This crate owns every rule about how a resume document may change.

pub mod db;
pub mod editor;
pub mod export;
pub mod logging;
pub mod model;
pub mod preview;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use editor::container::{confirm_and_remove, section_chrome, ConfirmPrompt, SectionChrome};
pub use editor::document::Document;
pub use editor::drag::{DragController, DragState, DropTarget};
pub use editor::forms::SkillsForm;
pub use editor::notice::{Notice, NoticeLevel};
pub use editor::seed::{sample_document, starter_document};
pub use export::{ExportAdapter, ExportArtifact, ExportError, PdfExporter};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::content::{HeaderContent, ItemRecord, SectionContent, SkillCategory, SkillsContent};
pub use model::resume::{OwnerId, ResumeId, ResumeRecord, SectionOrder, SectionRecord};
pub use model::section::{Section, SectionId, SectionKind};
pub use preview::layout::{layout_preview, LayoutConfig, PreviewLayout};
pub use preview::render::{render_preview, Preview};
pub use repo::resume_repo::{RepoError, RepoResult, ResumeRepository, SqliteResumeRepository};
pub use service::dashboard::Dashboard;
pub use service::editor_session::EditorSession;
pub use service::resume_service::{OpenedResume, ResumeService, ResumeServiceError};

/// Minimal health-check API for embedding callers.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
