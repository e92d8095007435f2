//! Property-based tests for the matcher.
//!
//! These tests use proptest to verify invariants around:
//! - Type-token normalization being idempotent
//! - A layout derived from a data tree always accepting that tree
//! - Top-level keys the data does not declare never causing a failure

use crate::matcher::validate;
use crate::policy::{MatchPolicy, Pairing};
use crate::signature::{TypeSignature, normalize_token, normalized_type_signature};
use crate::tree::{Mapping, Node};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary trees
// ============================================================================

/// Keys never carry the optional marker and never collide with synthesized `key<i>` names.
fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-j][a-z_]{0,7}").unwrap()
}

fn arb_leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,12}".prop_map(Node::String),
        any::<i32>().prop_map(|n| Node::Number(f64::from(n))),
        any::<bool>().prop_map(Node::Boolean),
        Just(Node::Null),
    ]
}

fn arb_node() -> impl Strategy<Value = Node> {
    arb_leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Node::Sequence),
            prop::collection::btree_map(arb_key(), inner, 0..4).prop_map(Node::Mapping),
        ]
    })
}

fn arb_mapping() -> impl Strategy<Value = Mapping> {
    prop::collection::btree_map(arb_key(), arb_node(), 0..5)
}

fn arb_pairing() -> impl Strategy<Value = Pairing> {
    prop_oneof![Just(Pairing::Positional), Just(Pairing::ByName)]
}

/// Replace every leaf with the token naming its type, keeping the mapping structure.
fn layout_for(node: &Node) -> Node {
    match node {
        Node::Mapping(m) => Node::Mapping(layout_mapping_for(m)),
        other => Node::String(TypeSignature::of(other).as_str().to_string()),
    }
}

fn layout_mapping_for(mapping: &Mapping) -> Mapping {
    mapping
        .iter()
        .map(|(k, v)| (k.clone(), layout_for(v)))
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn normalize_token_is_idempotent(token in ".*") {
        let once = normalize_token(&token).into_owned();
        let twice = normalize_token(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_signature_is_a_fixed_point(node in arb_node()) {
        let once = normalized_type_signature(&node).into_owned();
        let again = normalized_type_signature(&Node::String(once.clone())).into_owned();
        prop_assert_eq!(once, again);
    }

    #[test]
    fn derived_layout_accepts_its_own_data(data in arb_mapping(), pairing in arb_pairing()) {
        let layout = layout_mapping_for(&data);
        let policy = MatchPolicy::new(pairing);
        prop_assert!(validate(&data, &layout, &policy).is_ok());
    }

    #[test]
    fn undeclared_top_level_keys_are_ignored(
        data in arb_mapping(),
        extra in arb_mapping(),
        pairing in arb_pairing(),
    ) {
        // Layout keys are uppercase so the data never declares them.
        let layout: Mapping = extra
            .into_iter()
            .map(|(k, v)| (k.to_uppercase(), layout_for(&v)))
            .collect();
        let policy = MatchPolicy::new(pairing);
        prop_assert!(validate(&data, &layout, &policy).is_ok());
    }
}
