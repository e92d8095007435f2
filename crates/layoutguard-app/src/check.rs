//! The `check` use case: load the layout once, validate every data file, produce a report.

use anyhow::Context;
use camino::Utf8Path;
use layoutguard_domain::{Mapping, validate};
use layoutguard_repo::{DataFile, LoadError};
use layoutguard_settings::{EffectiveConfig, Overrides, ResolvedConfig};
use layoutguard_types::{
    FileResult, LayoutguardData, LayoutguardReport, RepoPath, ReportEnvelope, SCHEMA_REPORT_V1,
    ToolMeta, VerdictCounts, Verdict, ids,
};
use rayon::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Search root: data files are discovered under it and the layout path is relative to it.
    pub root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: LayoutguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: resolve config, load the layout, discover and validate data files.
///
/// A layout that cannot be read is an error: no data file is read in that case.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        layoutguard_settings::LayoutguardConfigV1::default()
    } else {
        layoutguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = layoutguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;
    let effective = &resolved.effective;

    let layout_path = RepoPath::from(effective.layout.as_path());
    let layout =
        layoutguard_repo::load_layout(&effective.module, &input.root.join(&effective.layout))?;

    let data_files: Vec<RepoPath> =
        layoutguard_repo::discover_data_files(input.root, &effective.extension, &effective.exclude)
            .context("discover data files")?
            .into_iter()
            .filter(|p| *p != layout_path)
            .collect();
    info!(
        module = %effective.module,
        files = data_files.len(),
        pairing = effective.policy.pairing.as_str(),
        "checking data files"
    );

    let mut files: Vec<FileResult> = data_files
        .par_iter()
        .map(|path| check_file(input.root, path, &layout, &layout_path, effective))
        .collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let counts = VerdictCounts::from_files(&files);
    let verdict = counts.verdict();
    let finished_at = OffsetDateTime::now_utc();

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "layoutguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict,
        data: LayoutguardData {
            module: effective.module.clone(),
            layout: layout_path,
            extension: effective.extension.clone(),
            pairing: effective.policy.pairing.as_str().to_string(),
            files_scanned: scanned_count(files.len()),
            counts,
            error: None,
        },
        files,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Saturates at `u32::MAX` instead of wrapping.
fn scanned_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// The per-file failure message.
pub fn mismatch_message(module: &str, layout: &RepoPath) -> String {
    format!("Data for module: {module} is not inline with the defined layout: {layout}")
}

fn check_file(
    root: &Utf8Path,
    path: &RepoPath,
    layout: &Mapping,
    layout_path: &RepoPath,
    effective: &EffectiveConfig,
) -> FileResult {
    let data = match layoutguard_repo::load_data(&root.join(path.as_str())) {
        Ok(DataFile::Tree(data)) => data,
        Ok(DataFile::Empty) => {
            debug!(%path, "empty document; skipped");
            return FileResult::skip(path.clone(), ids::CODE_EMPTY_DATA, "document is empty");
        }
        Err(LoadError::MalformedData { reason, .. }) => {
            info!(%path, %reason, "malformed data file");
            return FileResult::fail(path.clone(), ids::CODE_MALFORMED_DATA, reason);
        }
        Err(other) => {
            return FileResult::fail(path.clone(), ids::CODE_MALFORMED_DATA, other.to_string());
        }
    };

    match validate(&data, layout, &effective.policy) {
        Ok(()) => FileResult::pass(path.clone()),
        Err(mismatch) => {
            info!(%path, key_path = %mismatch.key_path, reason = %mismatch.reason, "shape mismatch");
            FileResult::fail(
                path.clone(),
                ids::CODE_SHAPE_MISMATCH,
                mismatch_message(&effective.module, layout_path),
            )
            .with_key_path(mismatch.key_path)
        }
    }
}

/// Map verdict to exit code: 0 = pass/skip, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Skip => 0,
        Verdict::Fail => 2,
    }
}
