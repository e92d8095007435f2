use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for layoutguard reports.
pub const SCHEMA_REPORT_V1: &str = "layoutguard.report.v1";

/// Overall outcome of a run.
///
/// `Skip` means nothing was validated: no data file was discovered, or every
/// discovered file was empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
    Skip,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::Fail => "fail",
            Verdict::Skip => "skip",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Pass,
    Fail,
    Skip,
}

/// Outcome for a single data file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileResult {
    pub path: RepoPath,
    pub status: FileStatus,

    /// Result code from [`crate::ids`]; absent for a plain pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Dotted key path of the level where the shapes diverged (e.g. `db.pool`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,
}

impl FileResult {
    pub fn pass(path: RepoPath) -> Self {
        Self {
            path,
            status: FileStatus::Pass,
            code: None,
            message: None,
            key_path: None,
        }
    }

    pub fn skip(path: RepoPath, code: &str, message: impl Into<String>) -> Self {
        Self {
            path,
            status: FileStatus::Skip,
            code: Some(code.to_string()),
            message: Some(message.into()),
            key_path: None,
        }
    }

    pub fn fail(path: RepoPath, code: &str, message: impl Into<String>) -> Self {
        Self {
            path,
            status: FileStatus::Fail,
            code: Some(code.to_string()),
            message: Some(message.into()),
            key_path: None,
        }
    }

    pub fn with_key_path(mut self, key_path: impl Into<String>) -> Self {
        self.key_path = Some(key_path.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct VerdictCounts {
    pub pass: u32,
    pub fail: u32,
    pub skip: u32,
}

impl VerdictCounts {
    pub fn from_files(files: &[FileResult]) -> Self {
        let mut counts = VerdictCounts::default();
        for f in files {
            match f.status {
                FileStatus::Pass => counts.pass += 1,
                FileStatus::Fail => counts.fail += 1,
                FileStatus::Skip => counts.skip += 1,
            }
        }
        counts
    }

    pub fn verdict(&self) -> Verdict {
        if self.fail > 0 {
            Verdict::Fail
        } else if self.pass > 0 {
            Verdict::Pass
        } else {
            Verdict::Skip
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Layoutguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct LayoutguardData {
    pub module: String,
    pub layout: RepoPath,
    pub extension: String,
    pub pairing: String,
    pub files_scanned: u32,
    pub counts: VerdictCounts,

    /// Set when the run aborted before any data file was validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RunError>,
}

/// A run-level failure (e.g. the layout could not be read).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunError {
    /// `tool.runtime` code from [`crate::ids`].
    pub code: String,
    pub message: String,
}

/// A generic receipt/envelope.
///
/// Keeping this generic allows tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = LayoutguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub files: Vec<FileResult>,
    pub data: TData,
}

pub type LayoutguardReport = ReportEnvelope<LayoutguardData>;
