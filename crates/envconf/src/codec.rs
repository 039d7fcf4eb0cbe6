//! Document codec implementation

use envconf_types::CodecError;
use serde::{de::DeserializeOwned, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Decodes documents into configuration records and encodes them back
pub trait DocumentCodec {
    /// Layer `document` over the current contents of `target`
    ///
    /// Keys missing from the document keep the target's current values.
    fn decode<T>(&self, document: &[u8], target: &mut T) -> Result<(), CodecError>
    where
        T: Serialize + DeserializeOwned;

    /// Serialize `source` to text
    fn encode<T>(&self, source: &T) -> Result<String, CodecError>
    where
        T: Serialize + ?Sized;
}

/// YAML codec with case-insensitive keys
///
/// The document is layered over the target's current values. A document key
/// binds to the target key it equals ignoring case, so `Port`, `PORT` and
/// `port` all reach a field `port`, and renamed fields keep their exact names.
/// Keys with no counterpart in the target keep their spelling, which leaves the
/// data keys of map fields intact. Under a record that is still unset there is
/// nothing to match against; keys there are folded to lower case.
///
/// Scalars are read by the field type, so `name: 42` fills a string field.
/// They pass through YAML's canonical form on the way: a string field given
/// the unquoted `1.10` reads `"1.1"`. Quote such values.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl DocumentCodec for YamlCodec {
    fn decode<T>(&self, document: &[u8], target: &mut T) -> Result<(), CodecError>
    where
        T: Serialize + DeserializeOwned,
    {
        let text = std::str::from_utf8(document)
            .map_err(|e| CodecError::Decode(format!("document is not valid UTF-8: {}", e)))?;

        let parsed: Value =
            serde_yaml::from_str(text).map_err(|e| CodecError::Decode(e.to_string()))?;

        let document = match parsed {
            Value::Null => {
                debug!("empty document, nothing to decode");
                return Ok(());
            }
            doc @ Value::Mapping(_) => doc,
            other => {
                return Err(CodecError::Decode(format!(
                    "expected a mapping at the document root, found {}",
                    value_kind(&other)
                )))
            }
        };

        // Current target values form the base layer; the document is merged on top.
        let base = serde_yaml::to_value(&*target)
            .map_err(|e| CodecError::Decode(format!("target cannot be layered: {}", e)))?;
        let layered = serde_yaml::to_string(&layer(base, document))
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        // Re-read as text so each scalar is interpreted by its field type.
        *target = serde_yaml::from_str(&layered).map_err(|e| CodecError::Decode(e.to_string()))?;
        Ok(())
    }

    fn encode<T>(&self, source: &T) -> Result<String, CodecError>
    where
        T: Serialize + ?Sized,
    {
        serde_yaml::to_string(source).map_err(|e| CodecError::Encode(e.to_string()))
    }
}

/// Merge `document` into `base`; mappings merge key by key, anything else replaces
fn layer(base: Value, document: Value) -> Value {
    match (base, document) {
        (Value::Mapping(mut base), Value::Mapping(document)) => {
            for (key, value) in document {
                let key = match_key(&base, key);
                match base.get_mut(&key) {
                    Some(existing) => {
                        let current = std::mem::take(existing);
                        *existing = layer(current, value);
                    }
                    None => {
                        base.insert(key, fold_keys(value));
                    }
                }
            }
            Value::Mapping(base)
        }
        (_, document) => fold_keys(document),
    }
}

/// The key of `base` equal to `key` ignoring case, or `key` itself
fn match_key(base: &Mapping, key: Value) -> Value {
    let Some(name) = key.as_str() else {
        return key;
    };
    if base.contains_key(name) {
        return key;
    }

    let folded = name.to_lowercase();
    base.keys()
        .find(|candidate| {
            candidate
                .as_str()
                .is_some_and(|candidate| candidate.to_lowercase() == folded)
        })
        .cloned()
        .unwrap_or(key)
}

/// Lower-case every mapping key, recursively
fn fold_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| {
                    let key = match key {
                        Value::String(key) => Value::String(key.to_lowercase()),
                        other => other,
                    };
                    (key, fold_keys(value))
                })
                .collect::<Mapping>(),
        ),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
