//! Domain model for styled documents.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep one run/paragraph/document shape for every editing surface.
//!
//! # Invariants
//! - Every document is identified by a stable `DocumentId`.
//! - Styling always lives on runs; paragraphs and documents never carry
//!   style state of their own.

pub mod document;
pub mod fonts;
pub mod paragraph;
pub mod style;
pub mod text;
