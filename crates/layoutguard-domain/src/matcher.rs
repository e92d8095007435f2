use crate::error::{MismatchReason, ShapeMismatch};
use crate::policy::{MatchPolicy, Pairing};
use crate::signature::{TypeSignature, normalize_token, normalized_type_signature};
use crate::tree::{Mapping, Node, OPTIONAL_MARKER, strip_optional};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::trace;

/// Working state of one comparison level.
///
/// `data` maps data keys to their normalized signature, `layout` maps layout keys
/// (optional marker stripped) to the declared token. A level matches when both are equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub data: BTreeMap<String, String>,
    pub layout: BTreeMap<String, String>,
}

impl Frame {
    fn record_data(&mut self, key: &str, value: &Node) {
        self.data
            .insert(key.to_string(), TypeSignature::of(value).as_str().to_string());
    }

    fn record_layout(&mut self, key: &str, value: &Node) {
        self.layout
            .insert(key.to_string(), normalized_type_signature(value).into_owned());
    }

    fn normalize_data_side(&mut self) {
        for signature in self.data.values_mut() {
            *signature = normalize_token(signature).into_owned();
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.data == self.layout
    }
}

/// One data entry lined up against one layout entry. `data` is `None` only when
/// pairing by name and the data lacks the layout key.
struct Pair<'a> {
    data_key: &'a str,
    data: Option<&'a Node>,
    layout_key: &'a str,
    layout: &'a Node,
}

/// Validate a data tree against a layout with positional pairing.
pub fn validate_with_defaults(data: &Mapping, layout: &Mapping) -> Result<(), ShapeMismatch> {
    validate(data, layout, &MatchPolicy::default())
}

/// Validate every top-level layout key that the data also declares.
///
/// Top-level keys are implicitly optional: a key the data does not declare is skipped.
/// The first mismatch is returned and the remaining keys are not examined.
pub fn validate(
    data: &Mapping,
    layout: &Mapping,
    policy: &MatchPolicy,
) -> Result<(), ShapeMismatch> {
    for (key, layout_subtree) in layout {
        let name = strip_optional(key).unwrap_or(key);
        match data.get(name) {
            Some(data_subtree) => compare_subtree(data_subtree, layout_subtree, policy, name)?,
            None => trace!(key = name, "top-level key not declared by data; skipped"),
        }
    }
    Ok(())
}

/// Compare one data subtree with its layout subtree. `key_path` only feeds diagnostics.
pub fn compare_subtree(
    data: &Node,
    layout: &Node,
    policy: &MatchPolicy,
    key_path: &str,
) -> Result<(), ShapeMismatch> {
    match (data, layout) {
        (Node::Mapping(data), Node::Mapping(layout)) => {
            compare_level(data, layout, policy, key_path, Frame::default())
        }
        _ => compare_leaf(data, layout, key_path),
    }
}

/// Pad `layout` with synthesized `key<i>` entries until it has as many entries as `data`.
///
/// Every synthesized entry repeats the last declared layout value, so a layout can declare
/// one representative entry for any number of same-shaped data entries. An empty layout
/// has nothing to repeat and is returned as is; [`compare_subtree`] rejects it against
/// non-empty data before pairing.
pub fn align_layout<'a>(data: &Mapping, layout: &'a Mapping) -> Cow<'a, Mapping> {
    if layout.len() >= data.len() {
        return Cow::Borrowed(layout);
    }
    let Some((_, last)) = layout.last_key_value() else {
        return Cow::Borrowed(layout);
    };

    let mut aligned = layout.clone();
    for i in (layout.len() + 1)..=data.len() {
        aligned.insert(format!("key{i}"), last.clone());
    }
    Cow::Owned(aligned)
}

fn compare_leaf(data: &Node, layout: &Node, key_path: &str) -> Result<(), ShapeMismatch> {
    let actual = TypeSignature::of(data);
    let declared = normalized_type_signature(layout);
    trace!(key_path, actual = actual.as_str(), declared = %declared, "compared leaf");

    if actual.as_str().eq_ignore_ascii_case(&declared) {
        Ok(())
    } else {
        Err(ShapeMismatch::new(key_path, MismatchReason::Leaf))
    }
}

fn compare_level(
    data: &Mapping,
    layout: &Mapping,
    policy: &MatchPolicy,
    key_path: &str,
    mut frame: Frame,
) -> Result<(), ShapeMismatch> {
    // An empty level declares no shape, so no data entry can conform to it.
    if layout.is_empty() && !data.is_empty() {
        trace!(key_path, data_keys = data.len(), "empty layout level");
        return Err(ShapeMismatch::new(key_path, MismatchReason::Level));
    }

    let layout = match policy.pairing {
        Pairing::Positional => align_layout(data, layout),
        Pairing::ByName => Cow::Borrowed(layout),
    };
    let pairs = match policy.pairing {
        Pairing::Positional => pair_positional(data, &layout),
        Pairing::ByName => pair_by_name(data, &layout),
    };

    for pair in pairs {
        if let (Some(Node::Mapping(data_child)), Node::Mapping(layout_child)) =
            (pair.data, pair.layout)
        {
            // Nested levels start from the caller's frame so far.
            let child_path = format!("{key_path}.{}", pair.data_key);
            compare_level(data_child, layout_child, policy, &child_path, frame.clone())?;
            continue;
        }

        let layout_key = match strip_optional(pair.layout_key) {
            Some(name) if !data.contains_key(name) => continue,
            Some(name) => name,
            None => pair.layout_key,
        };
        if let Some(value) = pair.data {
            frame.record_data(pair.data_key, value);
        }
        frame.record_layout(layout_key, pair.layout);
        frame.normalize_data_side();
    }

    trace!(key_path, data = ?frame.data, layout = ?frame.layout, "compared level");
    if frame.is_balanced() {
        Ok(())
    } else {
        Err(ShapeMismatch::new(key_path, MismatchReason::Level))
    }
}

/// Zip both mappings in sorted key order, truncating to the shorter side.
fn pair_positional<'a>(data: &'a Mapping, layout: &'a Mapping) -> Vec<Pair<'a>> {
    data.iter()
        .zip(layout.iter())
        .map(|((data_key, data), (layout_key, layout))| Pair {
            data_key,
            data: Some(data),
            layout_key,
            layout,
        })
        .collect()
}

/// Pair by key name.
///
/// Data keys the layout does not declare are held against the last declared layout entry,
/// which then stands in for them and is not required to be present itself.
fn pair_by_name<'a>(data: &'a Mapping, layout: &'a Mapping) -> Vec<Pair<'a>> {
    let undeclared: Vec<(&'a String, &'a Node)> = data
        .iter()
        .filter(|(key, _)| {
            !layout.contains_key(key.as_str())
                && !layout.contains_key(&format!("{key}{OPTIONAL_MARKER}"))
        })
        .collect();
    let representative = if undeclared.is_empty() {
        None
    } else {
        layout.last_key_value()
    };

    let mut pairs = Vec::new();
    for (layout_key, layout_value) in layout {
        let name = strip_optional(layout_key).unwrap_or(layout_key);
        let data_value = data.get(name);
        if data_value.is_none() && representative.is_some_and(|(key, _)| key == layout_key) {
            continue;
        }
        pairs.push(Pair {
            data_key: name,
            data: data_value,
            layout_key,
            layout: layout_value,
        });
    }

    if let Some((_, last)) = representative {
        for (data_key, data_value) in undeclared {
            pairs.push(Pair {
                data_key,
                data: Some(data_value),
                layout_key: data_key,
                layout: last,
            });
        }
    }

    pairs
}
