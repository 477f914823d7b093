//! Resume use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into load/save use cases.
//! - Keep the owner's resume list current.
//! - Drive one editing session and surface collaborator failures as notices.

pub mod dashboard;
pub mod editor_session;
pub mod resume_service;
