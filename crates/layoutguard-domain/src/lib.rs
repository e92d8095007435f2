//! Pure layout matching (no IO).
//!
//! Input: a data tree and a layout tree, deserialized elsewhere.
//! Output: `Ok(())` or the first shape mismatch found.

#![forbid(unsafe_code)]

pub mod error;
pub mod policy;
pub mod signature;
pub mod tree;

mod matcher;

pub use error::{MismatchReason, ShapeMismatch};
pub use matcher::{Frame, align_layout, compare_subtree, validate, validate_with_defaults};
pub use policy::{MatchPolicy, Pairing};
pub use signature::{TypeSignature, normalize_token, normalized_type_signature};
pub use tree::{Mapping, Node, OPTIONAL_MARKER, strip_optional};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
