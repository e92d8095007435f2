//! Stable DTOs and IDs used across the layoutguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs and codes
//! - canonical repo-relative path handling

#![forbid(unsafe_code)]

pub mod ids;
pub mod path;
pub mod receipt;

pub use path::RepoPath;
pub use receipt::{
    FileResult, FileStatus, LayoutguardData, LayoutguardReport, ReportEnvelope, RunError,
    SCHEMA_REPORT_V1, ToolMeta, Verdict, VerdictCounts,
};
