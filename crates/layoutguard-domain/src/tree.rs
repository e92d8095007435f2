use std::collections::BTreeMap;

/// Trailing marker on a layout key meaning "may be absent from the data".
pub const OPTIONAL_MARKER: char = '?';

/// Mapping level of a tree. Keys stay sorted, which is the order the matcher pairs in.
pub type Mapping = BTreeMap<String, Node>;

/// A deserialized configuration tree (data file or layout file).
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Boolean(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(value as f64)
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Sequence(value)
    }
}

/// Returns the key name without its optional marker, or `None` if the key is not optional.
pub fn strip_optional(key: &str) -> Option<&str> {
    key.strip_suffix(OPTIONAL_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_optional_only_trailing_marker() {
        assert_eq!(strip_optional("ssl?"), Some("ssl"));
        assert_eq!(strip_optional("ssl"), None);
        assert_eq!(strip_optional("a?b"), None);
    }
}
