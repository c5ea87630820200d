use core::str::FromStr;

use serde::{Deserialize, Serialize};

use tasklane_core::DomainError;

/// Role identifier used for RBAC.
///
/// The role set is closed: authorization only ever compares against these
/// three identifiers. Unknown names fail to parse instead of silently
/// becoming a new role, and comparison is case-sensitive exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Admin,
    User,
}

impl Role {
    /// Every role, in descending privilege order.
    pub const ALL: [Role; 3] = [Role::Superadmin, Role::Admin, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Human-readable description (admin screens, audit output).
    pub fn description(&self) -> &'static str {
        match self {
            Role::Superadmin => "Full platform administrator with unrestricted access",
            Role::Admin => "Workspace administrator managing users and projects",
            Role::User => "Regular member working on assigned tasks",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::Superadmin),
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("Admin".parse::<Role>().is_err());
        assert!("ADMIN".parse::<Role>().is_err());
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn display_matches_wire_name() {
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.as_str());
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::Superadmin).unwrap(), "\"superadmin\"");
        let parsed: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Role::User);
    }
}
