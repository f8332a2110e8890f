//! Crate Constants
//!
//! Names carry their qualifier: `*_GRANT_NAME` for host grant identifiers,
//! `*_SEPARATOR` for key syntax.

// =============================================================================
// Key Syntax
// =============================================================================

/// Separator between a namespace id and a logical key in a physical key.
///
/// No escaping is performed; a logical key containing the separator may
/// collide with a namespaced key.
pub const NAMESPACE_SEPARATOR: char = '.';

// =============================================================================
// Host Grant Names
// =============================================================================

/// Grant name gating host reads.
pub const GET_VALUE_GRANT_NAME: &str = "getValue";

/// Grant name gating host writes.
pub const SET_VALUE_GRANT_NAME: &str = "setValue";

/// Grant name gating host deletes.
pub const DELETE_VALUE_GRANT_NAME: &str = "deleteValue";

/// Grant name gating host key enumeration.
pub const LIST_VALUES_GRANT_NAME: &str = "listValues";
