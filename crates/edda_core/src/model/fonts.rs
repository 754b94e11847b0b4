//! Process-wide font family catalog.
//!
//! # Responsibility
//! - Answer whether a font family may be assigned to a style.
//! - Let host shells register families they enumerated from the platform.
//!
//! # Invariants
//! - Lookups are case-insensitive.
//! - The seeded portable families are always present.
//! - Registration only grows the catalog; families are never removed.

use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use std::sync::RwLock;

/// Families assumed renderable on every supported platform.
///
/// Host shells with real font enumeration are expected to extend this via
/// [`register_family`]; the engine itself never probes the system.
const PORTABLE_FAMILIES: &[&str] = &[
    "Arial",
    "Calibri",
    "Cambria",
    "Courier New",
    "DejaVu Sans",
    "DejaVu Serif",
    "Georgia",
    "Helvetica",
    "Liberation Mono",
    "Liberation Sans",
    "Liberation Serif",
    "Times New Roman",
    "Verdana",
];

static FONT_CATALOG: Lazy<RwLock<BTreeSet<String>>> = Lazy::new(|| {
    RwLock::new(
        PORTABLE_FAMILIES
            .iter()
            .map(|family| family.to_ascii_lowercase())
            .collect(),
    )
});

/// Returns whether the family is usable for styling, ignoring case.
pub fn is_known_family(family: &str) -> bool {
    let key = family.trim().to_ascii_lowercase();
    if key.is_empty() {
        return false;
    }
    match FONT_CATALOG.read() {
        Ok(catalog) => catalog.contains(&key),
        Err(_) => false,
    }
}

/// Registers an additional family, typically enumerated by the host shell.
///
/// Blank names are ignored; duplicate registration is a no-op.
pub fn register_family(family: impl Into<String>) {
    let key = family.into().trim().to_ascii_lowercase();
    if key.is_empty() {
        return;
    }
    if let Ok(mut catalog) = FONT_CATALOG.write() {
        catalog.insert(key);
    }
}

/// Returns the known families in sorted, lowercased form.
pub fn known_families() -> Vec<String> {
    match FONT_CATALOG.read() {
        Ok(catalog) => catalog.iter().cloned().collect(),
        Err(_) => Vec::new(),
    }
}
