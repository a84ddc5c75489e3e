//! Canonical serialization helpers
//!
//! Semantically equal values must serialize to identical bytes no matter how
//! they were built: object keys are sorted, no whitespace is emitted and
//! integral floats collapse to their integer form.

use serde_json::{Number, Value};

/// Largest magnitude below which every integer is exactly representable as f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Serialize a JSON value to its canonical string form
pub fn to_canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&canonical_number(n)),
        Value::String(s) => out.push_str(&quote(s)),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            // Never rely on the map's own iteration order
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&quote(key));
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
    }
}

/// JSON-escape a string, including the surrounding quotes
fn quote(s: &str) -> String {
    Value::from(s).to_string()
}

/// Render a number so that `1`, `1.0` and `-0.0`/`0` agree
fn canonical_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }

    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// Sort map entries by key (byte order)
///
/// Every mapping fed into a fingerprint goes through here first.
pub fn sorted_entries<'a, V, I>(entries: I) -> Vec<(&'a str, &'a V)>
where
    I: IntoIterator<Item = (&'a String, &'a V)>,
{
    let mut sorted: Vec<(&'a str, &'a V)> = entries
        .into_iter()
        .map(|(k, v)| (k.as_str(), v))
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    sorted
}
