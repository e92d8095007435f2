use thiserror::Error;

/// Why a level failed to match. No value diff is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MismatchReason {
    /// Keys or value types at a mapping level differ from the layout.
    Level,
    /// A scalar or sequence does not have the declared type.
    Leaf,
}

impl std::fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchReason::Level => f.write_str("keys or value types differ from the layout"),
            MismatchReason::Leaf => f.write_str("value type differs from the declared type"),
        }
    }
}

/// The data tree diverged from the layout. The first divergence aborts matching.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("shape mismatch at `{key_path}`: {reason}")]
pub struct ShapeMismatch {
    /// Dotted path of the level where the frames diverged, e.g. `db.pool`.
    pub key_path: String,
    pub reason: MismatchReason,
}

impl ShapeMismatch {
    pub fn new(key_path: impl Into<String>, reason: MismatchReason) -> Self {
        Self {
            key_path: key_path.into(),
            reason,
        }
    }
}
