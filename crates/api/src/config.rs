//! Startup configuration: guard paths, public allow-list, route rules, and
//! the navigation tree.
//!
//! Loaded once at process start and never hot-reloaded.

use serde::Deserialize;

use tasklane_access::{
    AccessPolicy, GuardPaths, NavEntry, NavGroup, NavTree, PathClassifier, PublicPaths, RouteRule,
    RouteTable,
};
use tasklane_auth::Role;
use tasklane_core::DomainError;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub guard: GuardPaths,
    pub public_paths: Vec<String>,
    pub route_rules: Vec<RouteRule>,
    pub nav: NavTree,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            guard: GuardPaths::default(),
            public_paths: vec![
                "/".to_string(),
                "/login".to_string(),
                "/forgot-password/*".to_string(),
            ],
            route_rules: vec![
                RouteRule {
                    prefix: "/admin".to_string(),
                    roles: vec![Role::Superadmin, Role::Admin],
                },
                RouteRule {
                    prefix: "/admin/settings".to_string(),
                    roles: vec![Role::Superadmin],
                },
            ],
            nav: NavTree(vec![
                NavGroup {
                    label: Some("General".to_string()),
                    entries: vec![
                        NavEntry {
                            label: "Dashboard".to_string(),
                            path: "/dashboard".to_string(),
                            icon: Some("home".to_string()),
                            roles: vec![],
                        },
                        NavEntry {
                            label: "My Tasks".to_string(),
                            path: "/tasks".to_string(),
                            icon: Some("check-square".to_string()),
                            roles: vec![],
                        },
                        NavEntry {
                            label: "Projects".to_string(),
                            path: "/projects".to_string(),
                            icon: Some("folder".to_string()),
                            roles: vec![],
                        },
                    ],
                },
                NavGroup {
                    label: Some("Administration".to_string()),
                    entries: vec![
                        NavEntry {
                            label: "Users".to_string(),
                            path: "/admin/users".to_string(),
                            icon: Some("users".to_string()),
                            roles: vec![Role::Superadmin, Role::Admin],
                        },
                        NavEntry {
                            label: "Workspace Settings".to_string(),
                            path: "/admin/settings".to_string(),
                            icon: Some("settings".to_string()),
                            roles: vec![Role::Superadmin],
                        },
                    ],
                },
            ]),
        }
    }
}

impl AppConfig {
    /// Load from the file referenced by `TASKLANE_CONFIG`, falling back to
    /// the built-in tables.
    pub fn load() -> anyhow::Result<Self> {
        let config: Self = match std::env::var("TASKLANE_CONFIG") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)?;
                serde_json::from_str(&raw)?
            }
            Err(_) => {
                tracing::info!("TASKLANE_CONFIG not set; using built-in route and nav tables");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the classifier cannot mean.
    pub fn validate(&self) -> Result<(), DomainError> {
        for raw in &self.public_paths {
            if !raw.starts_with('/') {
                return Err(DomainError::validation(format!(
                    "public path must start with '/': {raw}"
                )));
            }
        }
        for rule in &self.route_rules {
            if !rule.prefix.starts_with('/') {
                return Err(DomainError::validation(format!(
                    "route prefix must start with '/': {}",
                    rule.prefix
                )));
            }
        }
        Ok(())
    }

    /// Build the access policy the guard middleware evaluates.
    pub fn policy(&self) -> AccessPolicy {
        AccessPolicy::new(
            PathClassifier::new(
                PublicPaths::from_patterns(self.public_paths.iter().map(String::as_str)),
                RouteTable::new(self.route_rules.clone()),
            ),
            self.guard.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklane_access::{Decision, RouteAccess};
    use tasklane_auth::SessionSnapshot;

    #[test]
    fn built_in_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let policy = config.policy();
        assert_eq!(policy.classifier.classify("/login"), RouteAccess::Public);
        assert!(matches!(
            policy.evaluate(&SessionSnapshot::anonymous(), "/tasks").decision,
            Decision::Redirect(_)
        ));
    }

    #[test]
    fn config_json_deserializes() {
        let raw = r#"{
            "guard": { "login": "/signin" },
            "public_paths": ["/", "/signin"],
            "route_rules": [
                { "prefix": "/admin", "roles": ["superadmin", "admin"] },
                { "prefix": "/reports" }
            ],
            "nav": [
                { "label": "Main", "entries": [
                    { "label": "Home", "path": "/home" }
                ]}
            ]
        }"#;

        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.guard.login, "/signin");
        // Unset guard paths keep their defaults.
        assert_eq!(config.guard.forbidden, "/forbidden");
        assert!(config.route_rules[1].roles.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn relative_prefix_is_rejected() {
        let config = AppConfig {
            route_rules: vec![RouteRule {
                prefix: "admin".to_string(),
                roles: vec![],
            }],
            ..AppConfig::default()
        };

        assert!(config.validate().is_err());
    }
}
