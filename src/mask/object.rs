//! Apply a mask to a decoded JSON document
//!
//!     Reference consumer of the cursor protocol: walks a `serde_json::Value`
//!     in decoder order, drops object keys the mask denies and returns the
//!     masked copy. Tag-flattening consumers drive the cursor the same way,
//!     emitting `prefix.segment.segment=value` pairs instead of rebuilding a
//!     value; output shape, size caps and stringification are theirs, not the
//!     engine's.

use serde_json::{Map, Value};

use crate::mask::cursor::MaskCursor;
use crate::mask::tree::Mask;

/// Return a copy of `value` with every object key the mask denies removed.
///
/// Object keys are checked with `can_tag` before descending; a key whose
/// value is neither an object nor an array is a leaf value. Array elements
/// are never gated, only descended into: each advances the cursor by its
/// stringified index, so wildcard rules apply per element and a literal
/// rule segment like `0` matches the first element.
pub fn masked_object(mask: &Mask, value: &Value) -> Value {
    masked_rec(value, mask.cursor())
}

fn masked_rec(value: &Value, cursor: MaskCursor<'_>) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| masked_rec(item, cursor.with_next(&index.to_string())))
                .collect(),
        ),
        Value::Object(entries) => {
            let mut kept = Map::new();
            for (key, child) in entries {
                let is_leaf_value = !matches!(child, Value::Object(_) | Value::Array(_));
                if !cursor.can_tag(key, is_leaf_value) {
                    continue;
                }
                kept.insert(key.clone(), masked_rec(child, cursor.with_next(key)));
            }
            Value::Object(kept)
        }
        scalar => scalar.clone(),
    }
}
