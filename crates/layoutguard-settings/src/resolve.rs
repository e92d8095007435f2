use crate::model::LayoutguardConfigV1;
use anyhow::Context;
use camino::Utf8PathBuf;
use globset::Glob;
use layoutguard_domain::{MatchPolicy, Pairing};

pub const DEFAULT_EXTENSION: &str = "yaml";
pub const DEFAULT_EXCLUDE: &str = "hiera.yaml";
pub const DEFAULT_MODULES_DIR: &str = "modules";

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub module: Option<String>,
    pub extension: Option<String>,
    /// Replaces the configured exclude list when non-empty.
    pub exclude: Vec<String>,
    pub layout: Option<String>,
    pub pairing: Option<String>,
}

/// Settings a check run needs, with every default applied.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveConfig {
    pub module: String,
    pub extension: String,
    pub exclude: Vec<String>,
    /// Root-relative layout path.
    pub layout: Utf8PathBuf,
    pub policy: MatchPolicy,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

/// `<modules_dir>/<module>/test/layout`.
pub fn default_layout_path(modules_dir: &str, module: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(modules_dir)
        .join(module)
        .join("test")
        .join("layout")
}

pub fn resolve_config(
    cfg: LayoutguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let module = overrides
        .module
        .or(cfg.module)
        .context("no module given (pass --module or set `module` in layoutguard.toml)")?;
    let module = module.trim().to_string();
    if module.is_empty() || module.contains(['/', '\\']) {
        anyhow::bail!("invalid module name: {module:?}");
    }

    let extension = overrides
        .extension
        .or(cfg.extension)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let extension = extension.trim_start_matches('.').to_string();
    if extension.is_empty() {
        anyhow::bail!("extension must not be empty");
    }

    let exclude = if !overrides.exclude.is_empty() {
        overrides.exclude
    } else if !cfg.exclude.is_empty() {
        cfg.exclude
    } else {
        vec![DEFAULT_EXCLUDE.to_string()]
    };
    validate_globs(&exclude)?;

    let layout = match overrides.layout.or(cfg.layout) {
        Some(explicit) => Utf8PathBuf::from(explicit),
        None => {
            let modules_dir = cfg
                .modules_dir
                .unwrap_or_else(|| DEFAULT_MODULES_DIR.to_string());
            default_layout_path(&modules_dir, &module)
        }
    };

    let pairing = match overrides.pairing.or(cfg.pairing) {
        Some(v) => parse_pairing(&v)?,
        None => Pairing::default(),
    };

    Ok(ResolvedConfig {
        effective: EffectiveConfig {
            module,
            extension,
            exclude,
            layout,
            policy: MatchPolicy::new(pairing),
        },
    })
}

fn validate_globs(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid exclude glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_pairing(v: &str) -> anyhow::Result<Pairing> {
    match v {
        "positional" => Ok(Pairing::Positional),
        "by-name" | "by_name" => Ok(Pairing::ByName),
        other => anyhow::bail!("unknown pairing: {other} (expected 'positional' or 'by-name')"),
    }
}
