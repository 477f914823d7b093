//! Editor-side state and operations.
//!
//! # Responsibility
//! - Own the in-memory document and every way it can change.
//! - Keep UI-only state (drag gesture, skills focus) out of the document.
//!
//! # Invariants
//! - The document is changed only by value-returning operations.

pub mod container;
pub mod document;
pub mod drag;
pub mod forms;
pub mod notice;
pub mod seed;
