//! Text serialization formats owned by the core.
//!
//! # Responsibility
//! - Keep style-preserving text renderings and their parsers in one place.

pub mod tagged;
