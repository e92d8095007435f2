//! Config parsing and override resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::LayoutguardConfigV1;
pub use resolve::{
    DEFAULT_EXCLUDE, DEFAULT_EXTENSION, DEFAULT_MODULES_DIR, EffectiveConfig, Overrides,
    ResolvedConfig, default_layout_path,
};

/// Parse `layoutguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<LayoutguardConfigV1> {
    let cfg: LayoutguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config: overrides win over file values, file values over defaults.
pub fn resolve_config(
    cfg: LayoutguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_parses() {
        let cfg = parse_config_toml("").expect("parse");
        assert_eq!(cfg, LayoutguardConfigV1::default());
    }

    #[test]
    fn full_config_parses() {
        let cfg = parse_config_toml(
            r#"
schema = "layoutguard.config.v1"
module = "ntp"
extension = "yml"
exclude = ["hiera.yaml", "common/*.yml"]
modules_dir = "site/modules"
layout = "layouts/ntp.yaml"
pairing = "by-name"
"#,
        )
        .expect("parse");
        assert_eq!(cfg.module.as_deref(), Some("ntp"));
        assert_eq!(cfg.exclude.len(), 2);
        assert_eq!(cfg.pairing.as_deref(), Some("by-name"));
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let cfg = parse_config_toml("module = \"ntp\"\nfuture_knob = 3\n").expect("parse");
        assert_eq!(cfg.module.as_deref(), Some("ntp"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config_toml("module = ").is_err());
    }
}
