//! Hashing System - Seed Hash and Content Hashes
//!
//! Two unrelated hashes live here:
//! - `seed_hash`: the 31-multiplier string hash that drives trait selection.
//!   Its output is part of the reproducibility contract and must never change.
//! - SHA-256 over canonical JSON, used for instance ids and manifests.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

/// Hash an arbitrary seed string into a selection scalar.
///
/// `h = h * 31 + c` over Unicode scalar values, wrapping as a 32-bit signed
/// integer at every step, then taking the absolute value. The empty string
/// hashes to 0.
pub fn seed_hash(seed: &str) -> u32 {
    let h = seed
        .chars()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32));
    h.unsigned_abs()
}

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            let sorted_map: serde_json::Map<String, Value> = sorted
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_value(v)))
                .collect();
            Value::Object(sorted_map)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Compute the content hash of any serializable value (configs, manifests)
pub fn compute_content_hash<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(value)?;
    Ok(sha256_hex(canonical.as_bytes()))
}
