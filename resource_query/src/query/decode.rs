//! Decodes a canonical query string back into constraints and parameters.
//!
//! Decoded values are always JSON strings since the wire format carries no
//! type information.

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

use super::constraints::ConstraintStore;
use super::params::ParameterStore;
use crate::Error;

/// Constraints and parameters recovered from a query string.
#[derive(Clone, Debug, Default)]
pub struct ParsedQuery {
    pub constraints: ConstraintStore,
    pub parameters: ParameterStore,
}

enum Key {
    Filter(String),
    Sequence(String),
    Keyed(String, String),
    Scalar(String),
}

/// Parses `?filters[a][]=1&tags[]=x&range[from]=y&page=1` style input.
/// The leading `?` is optional.
pub fn parse_query_string(input: &str) -> Result<ParsedQuery, Error> {
    let mut parsed = ParsedQuery::default();
    let input = input.strip_prefix('?').unwrap_or(input);

    for pair in input.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = Value::String(decode(raw_value, raw_key)?);

        match parse_key(raw_key)? {
            Key::Filter(filter) => {
                let merged = match parsed.constraints.get(&filter) {
                    Some(existing) => push_value(existing.value.clone(), value),
                    None => value,
                };
                parsed.constraints.upsert(&filter, merged);
            }
            Key::Sequence(name) => match parsed.parameters.get_mut(&name) {
                Some(param) => match &mut param.value {
                    Value::Array(items) => items.push(value),
                    _ => return Err(Error::MalformedQuery(raw_key.to_string())),
                },
                None => parsed.parameters.append(&name, Value::Array(vec![value]))?,
            },
            Key::Keyed(name, key) => match parsed.parameters.get_mut(&name) {
                Some(param) => match &mut param.value {
                    Value::Object(map) => {
                        map.insert(key, value);
                    }
                    _ => return Err(Error::MalformedQuery(raw_key.to_string())),
                },
                None => {
                    let mut map = Map::new();
                    map.insert(key, value);
                    parsed.parameters.append(&name, Value::Object(map))?;
                }
            },
            Key::Scalar(name) => parsed.parameters.append(&name, value)?,
        }
    }

    Ok(parsed)
}

fn parse_key(raw: &str) -> Result<Key, Error> {
    let malformed = || Error::MalformedQuery(raw.to_string());

    let Some(open) = raw.find('[') else {
        if raw.contains(']') || raw.is_empty() {
            return Err(malformed());
        }
        return Ok(Key::Scalar(decode(raw, raw)?));
    };

    let name = &raw[..open];
    let rest = &raw[open..];
    if name.is_empty() || !rest.ends_with(']') {
        return Err(malformed());
    }

    if name == "filters" {
        if let Some(inner) = rest.strip_prefix('[').and_then(|r| r.strip_suffix("][]")) {
            if !inner.is_empty() && !inner.contains(['[', ']']) {
                return Ok(Key::Filter(decode(inner, raw)?));
            }
        }
    }

    if rest == "[]" {
        return Ok(Key::Sequence(decode(name, raw)?));
    }

    let inner = &rest[1..rest.len() - 1];
    if inner.is_empty() || inner.contains(['[', ']']) {
        return Err(malformed());
    }
    Ok(Key::Keyed(decode(name, raw)?, decode(inner, raw)?))
}

fn decode(component: &str, raw_key: &str) -> Result<String, Error> {
    percent_decode_str(component)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| Error::MalformedQuery(raw_key.to_string()))
}

fn push_value(existing: Value, value: Value) -> Value {
    match existing {
        Value::Array(mut items) => {
            items.push(value);
            Value::Array(items)
        }
        single => Value::Array(vec![single, value]),
    }
}
