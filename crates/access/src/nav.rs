//! Static navigation tree and role-based visibility filtering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use tasklane_auth::{Role, User, role_set};

/// A single navigation item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub label: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Roles allowed to see this entry; empty means visible to everyone.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
}

impl NavEntry {
    pub fn visible_to(&self, roles: &BTreeSet<Role>) -> bool {
        self.roles.is_empty() || self.roles.iter().any(|role| roles.contains(role))
    }
}

/// An ordered group of navigation items under an optional heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub entries: Vec<NavEntry>,
}

/// The full static menu tree, constructed once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavTree(pub Vec<NavGroup>);

impl NavTree {
    /// Prune the tree to what `roles` may see.
    ///
    /// Groups left with no visible entries are omitted entirely, never
    /// rendered as empty headings. Ordering within and across groups is
    /// preserved from the static configuration.
    pub fn visible_for(&self, roles: &BTreeSet<Role>) -> NavTree {
        NavTree(
            self.0
                .iter()
                .filter_map(|group| {
                    let entries: Vec<NavEntry> = group
                        .entries
                        .iter()
                        .filter(|entry| entry.visible_to(roles))
                        .cloned()
                        .collect();

                    if entries.is_empty() {
                        None
                    } else {
                        Some(NavGroup {
                            label: group.label.clone(),
                            entries,
                        })
                    }
                })
                .collect(),
        )
    }

    /// Filter for the current session's user; an absent user sees only
    /// unrestricted entries.
    pub fn visible_to_user(&self, user: Option<&User>) -> NavTree {
        self.visible_for(&role_set(user))
    }
}
