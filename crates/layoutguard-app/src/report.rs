use anyhow::Context;
use layoutguard_render::{RenderableCounts, RenderableFile, RenderableReport, RenderableStatus};
use layoutguard_repo::LoadError;
use layoutguard_types::{
    FileStatus, LayoutguardData, LayoutguardReport, RunError, SCHEMA_REPORT_V1, ToolMeta,
    Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<LayoutguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse layoutguard report")
}

pub fn serialize_report(report: &LayoutguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Report for a run that aborted before any data file was validated.
///
/// Layout load errors keep their own code; anything else is `runtime_error`.
pub fn runtime_error_report(err: &anyhow::Error) -> LayoutguardReport {
    let code = match err.chain().find_map(|e| e.downcast_ref::<LoadError>()) {
        Some(LoadError::LayoutUnavailable { .. }) => ids::CODE_LAYOUT_UNAVAILABLE,
        Some(LoadError::MalformedLayout { .. }) => ids::CODE_MALFORMED_LAYOUT,
        _ => ids::CODE_RUNTIME_ERROR,
    };
    let now = OffsetDateTime::now_utc();

    LayoutguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "layoutguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        files: Vec::new(),
        data: LayoutguardData {
            error: Some(RunError {
                code: code.to_string(),
                message: format!("{err:#}"),
            }),
            ..LayoutguardData::default()
        },
    }
}

pub fn to_renderable(report: &LayoutguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableStatus::Pass,
            Verdict::Fail => RenderableStatus::Fail,
            Verdict::Skip => RenderableStatus::Skip,
        },
        module: report.data.module.clone(),
        layout: report.data.layout.as_str().to_string(),
        counts: RenderableCounts {
            pass: report.data.counts.pass,
            fail: report.data.counts.fail,
            skip: report.data.counts.skip,
        },
        files: report
            .files
            .iter()
            .map(|f| RenderableFile {
                path: f.path.as_str().to_string(),
                status: match f.status {
                    FileStatus::Pass => RenderableStatus::Pass,
                    FileStatus::Fail => RenderableStatus::Fail,
                    FileStatus::Skip => RenderableStatus::Skip,
                },
                code: f.code.clone(),
                message: f.message.clone(),
                key_path: f.key_path.clone(),
            })
            .collect(),
        error: report
            .data
            .error
            .as_ref()
            .map(|e| format!("[{}] {}", e.code, e.message)),
    }
}
