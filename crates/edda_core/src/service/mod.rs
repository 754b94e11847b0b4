//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model edits and store calls into use-case level APIs.
//! - Keep UI shells decoupled from storage and model details.

pub mod editor;
