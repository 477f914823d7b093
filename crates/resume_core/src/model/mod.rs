//! Resume domain model.
//!
//! # Responsibility
//! - Define canonical section, content and persisted record shapes.
//! - Keep content a closed sum type so every consumer handles every kind.
//!
//! # Invariants
//! - Section kind is fixed at creation (it is the content variant).
//! - Section ids are opaque strings; resume and owner ids are UUIDs.

pub mod content;
pub mod resume;
pub mod section;
