//! Repository adapters: discover data files, read and parse YAML into layoutguard trees.
//!
//! This crate is allowed to do filesystem IO. Everything it hands back is owned and
//! immutable; matching happens in `layoutguard-domain`.

#![forbid(unsafe_code)]

mod discover;
mod load;

pub use discover::{build_exclude_set, discover_data_files};
pub use load::{DataFile, LoadError, load_data, load_layout, parse_document, yaml_to_node};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a data document.
    ///
    /// Returns `Ok(true)` for a mapping root, `Ok(false)` for an empty document and
    /// `Err(...)` otherwise. **Never panics** on any input.
    pub fn parse_data_text(text: &str) -> Result<bool, String> {
        parse_document(text).map(|doc| doc.is_some())
    }

    /// Compile exclude globs and return the candidates they exclude.
    ///
    /// Returns `Err(...)` if a pattern is invalid. **Never panics** on any input.
    pub fn excluded(patterns: &[String], candidates: &[String]) -> anyhow::Result<Vec<String>> {
        let set = build_exclude_set(patterns)?;
        Ok(candidates
            .iter()
            .filter(|c| set.is_match(c.as_str()))
            .cloned()
            .collect())
    }
}
