//! User account snapshot consumed by authorization checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tasklane_core::{AssignmentId, UserId};

use crate::Role;

/// User account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account can authenticate and reach protected routes.
    #[default]
    Active,
    /// Account has been deactivated (e.g. off-boarded).
    Inactive,
    /// Account has been suspended by an administrator.
    Suspended,
}

impl UserStatus {
    /// Only active accounts may access protected routes.
    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }
}

impl core::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "Active"),
            UserStatus::Inactive => write!(f, "Inactive"),
            UserStatus::Suspended => write!(f, "Suspended"),
        }
    }
}

/// A user ↔ role join record.
///
/// Duplicate assignments of the same role are tolerated but redundant:
/// authorization only looks at the flattened role set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub id: AssignmentId,
    pub role: Role,
    pub granted_at: DateTime<Utc>,
}

impl RoleAssignment {
    pub fn new(role: Role, granted_at: DateTime<Utc>) -> Self {
        Self {
            id: AssignmentId::new(),
            role,
            granted_at,
        }
    }
}

/// Snapshot of a user account as seen by the access-control layer.
///
/// This is a read-only view loaded by the session provider. Account
/// lifecycle (creation, suspension, role grants) belongs to the backend
/// persistence layer and never happens through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
    pub status: UserStatus,
    pub assignments: Vec<RoleAssignment>,
}

impl User {
    /// Build a snapshot with one assignment per role, granted now.
    ///
    /// This is how snapshots are materialized from verified token claims;
    /// persisted assignments carry their real grant timestamps instead.
    pub fn with_roles(
        id: UserId,
        display_name: impl Into<String>,
        email: impl Into<String>,
        status: UserStatus,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        let granted_at = Utc::now();
        Self {
            id,
            display_name: display_name.into(),
            email: email.into(),
            status,
            assignments: roles
                .into_iter()
                .map(|role| RoleAssignment::new(role, granted_at))
                .collect(),
        }
    }

    /// Flatten the assignment list to the roles it grants (with duplicates).
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.assignments.iter().map(|a| a.role)
    }
}
