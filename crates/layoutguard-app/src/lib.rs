//! Use case orchestration for layoutguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod render;
mod report;
mod schema;

pub use check::{CheckInput, CheckOutput, mismatch_message, run_check, verdict_exit_code};
pub use render::{render_annotations, render_markdown};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
pub use schema::{config_schema_json, report_schema_json};
