//! Role resolution: pure checks over the current session's user snapshot.
//!
//! - No IO
//! - No panics
//! - Absent user (session not loaded, or logged out) holds no roles

use std::collections::BTreeSet;

use crate::{Role, User};

/// Whether `user` holds `role`.
pub fn has_role(user: Option<&User>, role: Role) -> bool {
    user.is_some_and(|u| u.assignments.iter().any(|a| a.role == role))
}

/// Whether `user` holds at least one of `required`.
///
/// An empty `required` slice is vacuously false here; the "empty requirement
/// means authenticated-only" rule lives in the route classifier, not in role
/// resolution.
pub fn holds_any(user: Option<&User>, required: &[Role]) -> bool {
    required.iter().any(|role| has_role(user, *role))
}

/// The deduplicated set of roles held by `user`.
pub fn role_set(user: Option<&User>) -> BTreeSet<Role> {
    user.map(|u| u.roles().collect()).unwrap_or_default()
}
