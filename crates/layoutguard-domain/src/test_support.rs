use crate::tree::{Mapping, Node};

pub fn mapping<const N: usize>(entries: [(&str, Node); N]) -> Mapping {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

pub fn map<const N: usize>(entries: [(&str, Node); N]) -> Node {
    Node::Mapping(mapping(entries))
}

pub fn seq(items: Vec<Node>) -> Node {
    Node::Sequence(items)
}

pub fn s(value: &str) -> Node {
    Node::from(value)
}
