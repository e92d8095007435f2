use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `layoutguard.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional and unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LayoutguardConfigV1 {
    /// Optional schema string for tooling (`layoutguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Module whose layout the data is validated against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Extension of data files, without the dot (default `yaml`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Globs matched against a file's name and its root-relative path.
    /// An empty list keeps the default (`hiera.yaml`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Directory holding `<module>/test/layout` (default `modules`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules_dir: Option<String>,

    /// Explicit layout path, relative to the root. Overrides the module convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// How mapping entries are paired: `positional` (default) or `by-name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairing: Option<String>,
}
