//! Value Types
//!
//! The storage-safe scalar set and the in-memory value map produced by
//! reconciling loads.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Value
// =============================================================================

/// A storage-safe scalar value.
///
/// The extension backend accepts all three kinds; the page-local fallback is
/// string-only and rejects the rest (see [`StoreError::NonStringValue`]).
///
/// [`StoreError::NonStringValue`]: crate::backend::StoreError::NonStringValue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A string value.
    Str(String),
    /// A numeric value.
    Num(f64),
    /// A boolean value.
    Bool(bool),
}

impl Value {
    /// Whether this is a string value.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// The string payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether a stored value counts as actually present during
    /// reconciliation.
    ///
    /// An empty string is treated the same as an absent key (it is what a
    /// never-written slot reads back as on some hosts). Numbers and booleans
    /// are always present: a persisted `0` or `false` must win over a
    /// differing default on reload.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty(),
            Self::Num(_) | Self::Bool(_) => true,
        }
    }

    /// Convert a JSON value to a storage-safe scalar.
    ///
    /// Returns `None` for nulls, arrays, and objects, which have no scalar
    /// representation in a host store.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::String(s) => Some(Self::Str(s.clone())),
            serde_json::Value::Number(n) => n.as_f64().map(Self::Num),
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            _ => None,
        }
    }

    /// Convert to a JSON value, for host bridges that speak JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Str(s) => serde_json::Value::String(s.clone()),
            Self::Num(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Num(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Num(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// =============================================================================
// Values
// =============================================================================

/// The in-memory value map produced by a reconciling load.
///
/// Maps logical keys (bare, un-namespaced) to values. Ordered for
/// deterministic iteration. Owned by the caller after the load; mutated
/// either directly (no sync) or through a live wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values {
    entries: BTreeMap<String, Value>,
}

/// A caller-supplied set of defaults, consumed once at load time.
pub type Defaults = Values;

impl Values {
    /// Create an empty value map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by logical key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Insert a value, returning any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a key, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Whether the map holds the given logical key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over logical keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Values {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
