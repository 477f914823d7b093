//! Read-only resume preview.
//!
//! # Responsibility
//! - Render a document into a typed preview tree (`render`).
//! - Lay the tree out on a fixed-width page for export (`layout`).
//!
//! # Invariants
//! - Nothing in this module mutates or retains the document.

pub mod layout;
pub mod metrics;
pub mod render;
