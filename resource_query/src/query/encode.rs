//! Canonical query string serialization.
//!
//! Constraints are emitted first as `filters[<name>][]=<value>`, then
//! parameters in insertion order. Sequence parameters expand to one
//! `name[]=<element>` pair per element, keyed parameters to one
//! `name[<key>]=<value>` pair per key, scalars to a single `name=<value>`.
//! Names, keys and values are percent-encoded independently; the structural
//! characters `?`, `&`, `=`, `[` and `]` never are.
//!
//! An array-valued constraint is sent as a single JSON leaf
//! (`filters[ids][]=%5B%221%22%2C%222%22%5D`), not as one pair per element.
//! [`parse_query_string`](super::parse_query_string) reads that back as the
//! JSON text string; it only builds an array from repeated `filters[f][]`
//! pairs, which this encoder never emits.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use super::constraints::ConstraintStore;
use super::params::ParameterStore;

/// Bytes left unescaped, matching JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes one name, key or value component.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Renders a value as the text sent on the wire. Strings go out verbatim,
/// everything else (including nested composites) as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns the encoded `(key, value)` pairs in emission order.
pub fn encoded_pairs(
    constraints: &ConstraintStore,
    params: &ParameterStore,
) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for constraint in constraints.iter() {
        pairs.push((
            format!("filters[{}][]", encode_component(&constraint.filter)),
            encode_component(&render_value(&constraint.value)),
        ));
    }

    for param in params.iter() {
        let name = encode_component(&param.name);
        match &param.value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((
                        format!("{}[]", name),
                        encode_component(&render_value(item)),
                    ));
                }
            }
            Value::Object(map) => {
                for (key, item) in map {
                    pairs.push((
                        format!("{}[{}]", name, encode_component(key)),
                        encode_component(&render_value(item)),
                    ));
                }
            }
            scalar => pairs.push((name, encode_component(&render_value(scalar)))),
        }
    }

    pairs
}

/// Joins the pairs with `?` before the first and `&` before every other.
/// No pairs produce an empty string.
pub fn to_query_string(constraints: &ConstraintStore, params: &ParameterStore) -> String {
    let mut out = String::new();
    let mut first = true;
    for (key, value) in encoded_pairs(constraints, params) {
        out.push(if first { '?' } else { '&' });
        out.push_str(&key);
        out.push('=');
        out.push_str(&value);
        first = false;
    }
    out
}
