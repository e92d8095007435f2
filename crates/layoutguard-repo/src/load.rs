use camino::{Utf8Path, Utf8PathBuf};
use layoutguard_domain::{Mapping, Node};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The layout could not be opened. Fatal for the whole run.
    #[error("Module: {module} needs {module}/test/layout with right perms")]
    LayoutUnavailable {
        module: String,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("layout {path} is malformed: {reason}")]
    MalformedLayout { path: Utf8PathBuf, reason: String },

    #[error("data file {path} is malformed: {reason}")]
    MalformedData { path: Utf8PathBuf, reason: String },
}

/// A loaded data file.
#[derive(Clone, Debug, PartialEq)]
pub enum DataFile {
    /// Null or empty document; there is nothing to validate.
    Empty,
    Tree(Mapping),
}

/// Read the layout for `module` from `path`.
///
/// An empty layout document is an empty mapping.
pub fn load_layout(module: &str, path: &Utf8Path) -> Result<Mapping, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::LayoutUnavailable {
        module: module.to_string(),
        path: path.to_path_buf(),
        source,
    })?;
    let layout = parse_document(&text)
        .map_err(|reason| LoadError::MalformedLayout {
            path: path.to_path_buf(),
            reason,
        })?
        .unwrap_or_default();
    debug!(%path, keys = layout.len(), "loaded layout");
    Ok(layout)
}

/// Read one data file.
pub fn load_data(path: &Utf8Path) -> Result<DataFile, LoadError> {
    let malformed = |reason: String| LoadError::MalformedData {
        path: path.to_path_buf(),
        reason,
    };
    let text = std::fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
    Ok(match parse_document(&text).map_err(malformed)? {
        Some(tree) => DataFile::Tree(tree),
        None => DataFile::Empty,
    })
}

/// Parse a single YAML document. `Ok(None)` means the document is null or empty.
pub fn parse_document(text: &str) -> Result<Option<Mapping>, String> {
    let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    match yaml_to_node(&value)? {
        Node::Mapping(mapping) => Ok(Some(mapping)),
        Node::Null => Ok(None),
        other => Err(format!(
            "document root must be a mapping, found {}",
            layoutguard_domain::TypeSignature::of(&other)
        )),
    }
}

/// Convert a YAML value into a tree node.
///
/// Scalar mapping keys (numbers, booleans) are stringified; tags are ignored.
pub fn yaml_to_node(yaml: &serde_yaml::Value) -> Result<Node, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Node::Null),
        serde_yaml::Value::Bool(b) => Ok(Node::Boolean(*b)),
        serde_yaml::Value::Number(n) => n
            .as_f64()
            .map(Node::Number)
            .ok_or_else(|| format!("unsupported YAML number: {n}")),
        serde_yaml::Value::String(s) => Ok(Node::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Node>, String> = seq.iter().map(yaml_to_node).collect();
            Ok(Node::Sequence(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut out = Mapping::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                out.insert(key, yaml_to_node(v)?);
            }
            Ok(Node::Mapping(out))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_node(&tagged.value),
    }
}
