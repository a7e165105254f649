//! JSON overlay mechanics shared by option layers.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{SynthResult, SynthResultExt};

/// Overlay `layer` onto `target`, updating `target` in place.
///
/// Objects merge key by key, recursing into nested objects. Any other value
/// replaces `target` wholesale.
///
/// ```rust
/// use record_synth::options::merge_value;
/// use serde_json::json;
///
/// let mut acc = json!({"eq": true, "frozen": false});
/// merge_value(&mut acc, json!({"frozen": true}));
/// assert_eq!(acc, json!({"eq": true, "frozen": true}));
/// ```
pub fn merge_value(target: &mut Value, layer: Value) {
    match layer {
        Value::Object(map) => merge_object(target, map),
        _ => *target = layer,
    }
}

fn merge_object(target: &mut Value, map: Map<String, Value>) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }

    let Some(target_map) = target.as_object_mut() else {
        return;
    };

    for (key, value) in map {
        match target_map.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                target_map.insert(key, value);
            }
        }
    }
}

/// Deserialize a merged JSON value into `T`.
///
/// # Errors
///
/// Returns [`crate::SynthError::OptionsDocument`] when the value does not match
/// `T`.
pub fn from_value<T: DeserializeOwned>(value: Value) -> SynthResult<T> {
    serde_json::from_value(value).into_synth()
}
