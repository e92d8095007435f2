//! Type signatures: the closed classification the matcher compares instead of values.

use crate::tree::Node;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

/// Declared tokens that name the boolean type indirectly: the bare words `true`/`false`,
/// or a runtime class name such as `TrueClass`/`FalseClass`.
static BOOLEAN_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:true|false)$|(?:true|false)class").expect("boolean token pattern")
});

/// Shape of a single value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeSignature {
    String,
    Number,
    Boolean,
    Array,
    Mapping,
    Null,
}

impl TypeSignature {
    /// Classify a value. Sequences are always `array`, whatever their elements look like.
    pub fn of(node: &Node) -> Self {
        match node {
            Node::Sequence(_) => TypeSignature::Array,
            Node::Boolean(_) => TypeSignature::Boolean,
            Node::String(_) => TypeSignature::String,
            Node::Number(_) => TypeSignature::Number,
            Node::Mapping(_) => TypeSignature::Mapping,
            Node::Null => TypeSignature::Null,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeSignature::String => "string",
            TypeSignature::Number => "number",
            TypeSignature::Boolean => "boolean",
            TypeSignature::Array => "array",
            TypeSignature::Mapping => "mapping",
            TypeSignature::Null => "null",
        }
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coerce boolean-naming tokens to `boolean`; every other token is returned unchanged.
pub fn normalize_token(token: &str) -> Cow<'_, str> {
    if BOOLEAN_TOKEN.is_match(token) {
        Cow::Borrowed(TypeSignature::Boolean.as_str())
    } else {
        Cow::Borrowed(token)
    }
}

/// The type token a layout leaf declares.
///
/// A string leaf is the token as written (after boolean coercion). Any other leaf
/// declares its own type by example: `true` declares `boolean`, `[]` declares `array`.
pub fn normalized_type_signature(node: &Node) -> Cow<'_, str> {
    match node {
        Node::String(token) => normalize_token(token),
        other => Cow::Borrowed(TypeSignature::of(other).as_str()),
    }
}
