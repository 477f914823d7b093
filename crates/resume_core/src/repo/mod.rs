//! Repository layer for persisted resumes.
//!
//! # Responsibility
//! - Define the owner-scoped persistence contract.
//! - Keep SQLite query details out of services and the editor.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`ResumeNotFound`,
//!   `SectionNotFound`) in addition to DB transport errors.

pub mod resume_repo;
