//! Key Namespacing
//!
//! Deterministic mapping from a logical key (plus optional namespace id) to
//! the physical key used against a backend.

use crate::constants::NAMESPACE_SEPARATOR;

/// Compute the physical storage key for a logical key.
///
/// With no namespace (or an empty one) the logical key is used unchanged;
/// otherwise the physical key is `"<namespace>.<key>"`. Separators embedded
/// in the logical key are not escaped, so `physical_key("b", Some("a"))` and
/// `physical_key("a.b", None)` collide; accepted edge case.
#[must_use]
pub fn physical_key(logical: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}{NAMESPACE_SEPARATOR}{logical}"),
        _ => logical.to_owned(),
    }
}
