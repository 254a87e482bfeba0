//! Application data embedded from TOML/JSON files at compile time.
//!
//! This module provides access to application-level data that is:
//! - Embedded at compile time via `include_str!`
//! - Parsed lazily on first access via `OnceLock`
//! - Immutable at runtime (not user-configurable)
//!
//! This is distinct from `config.rs` which handles user preferences.
//! App data defines *what the dashboard shows* (chapters, syllabus tables),
//! while config defines *user choices* (theme, layout, catalog source).
//!
//! Data files are located in `embedded/`:
//! - `chapters.json` - The static chapter catalog
//! - `syllabus.toml` - Exam summary, class list and unit names per subject

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::chapter::{Chapter, Subject};

// Embed data files at compile time
const CHAPTERS_JSON: &str = include_str!("../embedded/chapters.json");
const SYLLABUS_TOML: &str = include_str!("../embedded/syllabus.toml");

// ============================================================================
// Chapter catalog
// ============================================================================

/// Get the embedded chapter catalog (lazy-loaded)
pub fn embedded_chapters() -> &'static [Chapter] {
    static CHAPTERS: OnceLock<Vec<Chapter>> = OnceLock::new();
    CHAPTERS.get_or_init(|| {
        serde_json::from_str(CHAPTERS_JSON).unwrap_or_else(|e| {
            panic!("Failed to parse chapters.json: {}", e);
        })
    })
}

// ============================================================================
// Syllabus
// ============================================================================

/// Exam metadata and option tables for the filter bar
#[derive(Debug, Deserialize)]
pub struct Syllabus {
    pub exam: ExamInfo,
    /// Unit names keyed by subject name
    pub units: HashMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ExamInfo {
    /// Exam title shown in the sidebar (e.g., "JEE Main")
    pub name: String,
    /// One-line paper/question summary
    pub summary: String,
    /// Class numbers offered by the class filter
    pub classes: Vec<String>,
}

impl Syllabus {
    /// Unit names for a subject, in display order
    pub fn units_for(&self, subject: Subject) -> &[String] {
        self.units
            .get(subject.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Get the syllabus tables (lazy-loaded)
pub fn syllabus() -> &'static Syllabus {
    static SYLLABUS: OnceLock<Syllabus> = OnceLock::new();
    SYLLABUS.get_or_init(|| {
        toml::from_str(SYLLABUS_TOML).unwrap_or_else(|e| {
            panic!("Failed to parse syllabus.toml: {}", e);
        })
    })
}
