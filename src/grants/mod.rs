//! Capability Model
//!
//! Which host storage operations the current session may use. The policy is
//! injected once at store construction and never re-probed from ambient
//! state; each entry point consults it per call.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DELETE_VALUE_GRANT_NAME, GET_VALUE_GRANT_NAME, LIST_VALUES_GRANT_NAME, SET_VALUE_GRANT_NAME,
};

// =============================================================================
// Grant
// =============================================================================

/// One named host permission, gating one storage operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grant {
    /// Host reads (`getValue`).
    GetValue,
    /// Host writes (`setValue`).
    SetValue,
    /// Host deletes (`deleteValue`).
    DeleteValue,
    /// Host key enumeration (`listValues`).
    ListValues,
}

impl Grant {
    /// The host-side grant-name string.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::GetValue => GET_VALUE_GRANT_NAME,
            Self::SetValue => SET_VALUE_GRANT_NAME,
            Self::DeleteValue => DELETE_VALUE_GRANT_NAME,
            Self::ListValues => LIST_VALUES_GRANT_NAME,
        }
    }
}

// =============================================================================
// GrantSet
// =============================================================================

/// An explicit subset of the four storage grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSet {
    /// `getValue` held.
    pub get: bool,
    /// `setValue` held.
    pub set: bool,
    /// `deleteValue` held.
    pub delete: bool,
    /// `listValues` held.
    pub list: bool,
}

impl GrantSet {
    /// The empty grant set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// All four storage grants.
    #[must_use]
    pub fn full() -> Self {
        Self {
            get: true,
            set: true,
            delete: true,
            list: true,
        }
    }

    /// Add one grant.
    #[must_use]
    pub fn with(mut self, grant: Grant) -> Self {
        match grant {
            Grant::GetValue => self.get = true,
            Grant::SetValue => self.set = true,
            Grant::DeleteValue => self.delete = true,
            Grant::ListValues => self.list = true,
        }
        self
    }

    /// Whether the set holds the given grant.
    #[must_use]
    pub fn contains(self, grant: Grant) -> bool {
        match grant {
            Grant::GetValue => self.get,
            Grant::SetValue => self.set,
            Grant::DeleteValue => self.delete,
            Grant::ListValues => self.list,
        }
    }
}

// =============================================================================
// GrantPolicy
// =============================================================================

/// The session's capability stance, decided once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantPolicy {
    /// All storage grants held.
    Full,
    /// Only the listed grants held; the rest fall back to page storage.
    Partial(GrantSet),
    /// No live host at all; everything falls back to page storage.
    NoHost,
}

impl GrantPolicy {
    /// Whether the policy allows one grant.
    #[must_use]
    pub fn allows(self, grant: Grant) -> bool {
        match self {
            Self::Full => true,
            Self::Partial(set) => set.contains(grant),
            Self::NoHost => false,
        }
    }

    /// Whether the policy allows every listed grant.
    #[must_use]
    pub fn allows_all(self, grants: &[Grant]) -> bool {
        grants.iter().all(|g| self.allows(*g))
    }

    /// The effective grant set.
    #[must_use]
    pub fn grant_set(self) -> GrantSet {
        match self {
            Self::Full => GrantSet::full(),
            Self::Partial(set) => set,
            Self::NoHost => GrantSet::empty(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_names() {
        assert_eq!(Grant::GetValue.name(), "getValue");
        assert_eq!(Grant::SetValue.name(), "setValue");
        assert_eq!(Grant::DeleteValue.name(), "deleteValue");
        assert_eq!(Grant::ListValues.name(), "listValues");
    }

    #[test]
    fn test_grant_set_builder() {
        let set = GrantSet::empty().with(Grant::GetValue).with(Grant::ListValues);
        assert!(set.contains(Grant::GetValue));
        assert!(set.contains(Grant::ListValues));
        assert!(!set.contains(Grant::SetValue));
        assert!(!set.contains(Grant::DeleteValue));
    }

    #[test]
    fn test_full_policy_allows_everything() {
        let policy = GrantPolicy::Full;
        assert!(policy.allows_all(&[
            Grant::GetValue,
            Grant::SetValue,
            Grant::DeleteValue,
            Grant::ListValues,
        ]));
    }

    #[test]
    fn test_partial_policy_is_independent_per_grant() {
        let policy = GrantPolicy::Partial(GrantSet::empty().with(Grant::GetValue));
        assert!(policy.allows(Grant::GetValue));
        assert!(!policy.allows(Grant::SetValue));
        assert!(!policy.allows_all(&[Grant::GetValue, Grant::SetValue]));
    }

    #[test]
    fn test_no_host_allows_nothing() {
        assert!(!GrantPolicy::NoHost.allows(Grant::GetValue));
        assert!(GrantPolicy::NoHost.allows_all(&[]));
    }
}
