//! Field hash contributions for spatial identifiers.
//!
//! Identifier hash codes are a sum of per-field contributions reduced modulo
//! `i32::MAX`. Hosts keep these values in caches keyed by hash code, so the
//! arithmetic here must not change.

const MODULUS: i64 = i32::MAX as i64;

/// 31-polynomial hash over UTF-16 code units with 32-bit wrapping.
pub(crate) fn string_hash(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Contribution of a nullable string field; absent fields contribute zero.
pub(crate) fn field_hash(value: Option<&str>) -> i64 {
    value.map_or(0, |v| i64::from(string_hash(v)))
}

/// Sums contributions and reduces modulo `i32::MAX`.
///
/// The remainder keeps the sign of the sum, so the result always lies in
/// `(-i32::MAX, i32::MAX)`.
pub(crate) fn combine(contributions: &[i64]) -> i32 {
    let sum: i64 = contributions.iter().sum();
    // |sum % MODULUS| < i32::MAX, so the narrowing is lossless.
    (sum % MODULUS) as i32
}
