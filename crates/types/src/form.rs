//! `application/x-www-form-urlencoded` codec in Stripe's bracket notation.
//!
//! Request parameters are serialized through `serde_json::Value` and then
//! flattened into ordered key/value pairs:
//!
//! ```text
//! price_data[recurring][interval]=month
//! tax_rates[0]=txr_1
//! metadata[order_id]=6735
//! ```
//!
//! Empty arrays and empty maps are sent as `key=`, which the API reads as
//! "clear this field". Decoding rebuilds the nested value tree from the
//! bracket keys; numeric and boolean fields accept their string spellings
//! through `serde_with::PickFirst` on the parameter structures.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;
use tracing::debug;

/// Errors raised while encoding or decoding form bodies
#[derive(Error, Debug)]
pub enum FormError {
    /// Only objects can be flattened into key/value pairs
    #[error("Form values must be encoded from an object, got {0}")]
    NotAnObject(&'static str),

    /// Unbalanced or misplaced brackets in a form key
    #[error("Malformed form key: {0}")]
    MalformedKey(String),

    /// Map keys cannot be empty or contain brackets
    #[error("Invalid map key {0:?}: keys cannot be empty or contain '[' or ']'")]
    InvalidMapKey(String),

    /// The same key carries a scalar and nested fields
    #[error("Form key {0} is used both as a value and as a container")]
    ConflictingKey(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormError>;

/// Free-form map fields whose keys are never list indices
const MAP_FIELDS: &[&str] = &["metadata"];

/// Flatten a serializable value into ordered form pairs
pub fn to_pairs<T: Serialize + ?Sized>(value: &T) -> Result<Vec<(String, String)>> {
    match serde_json::to_value(value)? {
        JsonValue::Object(map) => {
            let mut pairs = Vec::new();
            for (key, value) in map {
                flatten_into(&mut pairs, key, value)?;
            }
            Ok(pairs)
        }
        other => Err(FormError::NotAnObject(kind(&other))),
    }
}

/// Encode a serializable value as a percent-encoded form body
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let pairs = to_pairs(value)?;
    debug!("Encoding form body with {} pairs", pairs.len());
    Ok(url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish())
}

/// Decode a form body into a parameter structure
pub fn from_str<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value = parse(body)?;
    Ok(serde_json::from_value(value)?)
}

/// Rebuild the nested value tree of a form body, leaving every leaf a string
pub fn parse(body: &str) -> Result<JsonValue> {
    let mut root = Map::new();
    let mut count = 0usize;

    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        let path = split_key(&key)?;
        insert(&mut root, &key, &path, value.into_owned())?;
        count += 1;
    }

    debug!("Parsed form body with {} pairs", count);
    Ok(normalize(JsonValue::Object(root), false))
}

/// Deserialize an optional list or map that may arrive as `key=` (empty).
///
/// Use with `#[serde(default, deserialize_with = "...")]`.
pub fn empty_or<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OrEmpty<V> {
        Value(V),
        Empty(String),
    }

    match Option::<OrEmpty<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(OrEmpty::Value(value)) => Ok(Some(value)),
        Some(OrEmpty::Empty(s)) if s.is_empty() => Ok(Some(T::default())),
        Some(OrEmpty::Empty(s)) => Err(D::Error::custom(format!(
            "expected a list or a map, got string {:?}",
            s
        ))),
    }
}

fn flatten_into(pairs: &mut Vec<(String, String)>, key: String, value: JsonValue) -> Result<()> {
    match value {
        JsonValue::Null => {}
        JsonValue::Bool(b) => pairs.push((key, b.to_string())),
        JsonValue::Number(n) => pairs.push((key, n.to_string())),
        JsonValue::String(s) => pairs.push((key, s)),
        JsonValue::Array(items) if items.is_empty() => pairs.push((key, String::new())),
        JsonValue::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                flatten_into(pairs, format!("{}[{}]", key, index), item)?;
            }
        }
        JsonValue::Object(map) if map.is_empty() => pairs.push((key, String::new())),
        JsonValue::Object(map) => {
            for (field, item) in map {
                if field.is_empty() || field.contains(|c| c == '[' || c == ']') {
                    return Err(FormError::InvalidMapKey(field));
                }
                flatten_into(pairs, format!("{}[{}]", key, field), item)?;
            }
        }
    }
    Ok(())
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Split `a[b][c]` into `["a", "b", "c"]`. An empty segment (`a[]`) appends.
fn split_key(key: &str) -> Result<Vec<&str>> {
    let malformed = || FormError::MalformedKey(key.to_string());

    let (head, mut rest) = match key.find('[') {
        Some(index) => (&key[..index], &key[index..]),
        None => (key, ""),
    };
    if head.is_empty() || head.contains(']') {
        return Err(malformed());
    }

    let mut segments = vec![head];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[').ok_or_else(malformed)?;
        let close = inner.find(']').ok_or_else(malformed)?;
        let segment = &inner[..close];
        if segment.contains('[') {
            return Err(malformed());
        }
        segments.push(segment);
        rest = &inner[close + 1..];
    }

    Ok(segments)
}

fn insert(
    node: &mut Map<String, JsonValue>,
    key: &str,
    path: &[&str],
    value: String,
) -> Result<()> {
    let Some((first, rest)) = path.split_first() else {
        return Err(FormError::MalformedKey(key.to_string()));
    };

    let segment = if first.is_empty() {
        node.len().to_string()
    } else {
        first.to_string()
    };

    if rest.is_empty() {
        if matches!(node.get(&segment), Some(JsonValue::Object(_))) {
            return Err(FormError::ConflictingKey(key.to_string()));
        }
        // Repeated keys: last one wins
        node.insert(segment, JsonValue::String(value));
        return Ok(());
    }

    match node
        .entry(segment)
        .or_insert_with(|| JsonValue::Object(Map::new()))
    {
        JsonValue::Object(child) => insert(child, key, rest, value),
        _ => Err(FormError::ConflictingKey(key.to_string())),
    }
}

/// Objects whose keys are all indices become arrays, ordered by index.
/// Objects under a [`MAP_FIELDS`] key stay maps whatever their keys look like.
fn normalize(value: JsonValue, is_map_field: bool) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let is_sequence = !is_map_field
                && !map.is_empty()
                && map.keys().all(|k| k.parse::<usize>().is_ok());
            if is_sequence {
                let mut items: Vec<(usize, JsonValue)> = map
                    .into_iter()
                    .filter_map(|(k, v)| k.parse::<usize>().ok().map(|i| (i, normalize(v, false))))
                    .collect();
                items.sort_by_key(|(index, _)| *index);
                JsonValue::Array(items.into_iter().map(|(_, v)| v).collect())
            } else {
                JsonValue::Object(
                    map.into_iter()
                        .map(|(k, v)| {
                            let child_is_map = MAP_FIELDS.contains(&k.as_str());
                            (k, normalize(v, child_is_map))
                        })
                        .collect(),
                )
            }
        }
        other => other,
    }
}
