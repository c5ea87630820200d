//! Path classification: public allow-list + role-requirement table.
//!
//! Both tables are static configuration, constructed once at startup and
//! never mutated.

use serde::{Deserialize, Serialize};

use tasklane_auth::Role;

/// One entry of the public-path allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicPattern {
    /// Matches the path exactly.
    Exact(String),
    /// Matches the prefix itself and everything below it.
    Prefix(String),
}

impl PublicPattern {
    /// Parse the config notation: a trailing `/*` marks a prefix entry.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_suffix("/*") {
            Some(prefix) => Self::Prefix(prefix.to_string()),
            None => Self::Exact(raw.to_string()),
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            PublicPattern::Exact(p) => path == p,
            PublicPattern::Prefix(p) => prefix_matches(p, path),
        }
    }
}

/// Public-path allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicPaths(Vec<PublicPattern>);

impl PublicPaths {
    pub fn new(patterns: Vec<PublicPattern>) -> Self {
        Self(patterns)
    }

    /// Parse from config notation, e.g. `["/", "/login", "/forgot-password/*"]`.
    pub fn from_patterns<'a>(raw: impl IntoIterator<Item = &'a str>) -> Self {
        Self(raw.into_iter().map(PublicPattern::parse).collect())
    }

    pub fn matches(&self, path: &str) -> bool {
        self.0.iter().any(|pattern| pattern.matches(path))
    }
}

/// A path prefix and the roles permitted below it.
///
/// An empty role list is explicitly equivalent to "authenticated only".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub prefix: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Role-requirement lookup table.
///
/// Lookup is longest-prefix match, so `/admin/settings` can tighten what
/// `/admin` allows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable(Vec<RouteRule>);

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self(rules)
    }

    /// The most specific rule covering `path`, if any.
    pub fn lookup(&self, path: &str) -> Option<&RouteRule> {
        self.0
            .iter()
            .filter(|rule| prefix_matches(&rule.prefix, path))
            .max_by_key(|rule| rule.prefix.len())
    }
}

/// Access requirement derived for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable without authentication.
    Public,
    /// Any active, authenticated user may access.
    AuthenticatedOnly,
    /// Caller must hold at least one of the listed roles.
    RequiresAnyOf(Vec<Role>),
}

/// Path classifier over the static allow-list and rule table.
#[derive(Debug, Clone, Default)]
pub struct PathClassifier {
    public: PublicPaths,
    routes: RouteTable,
}

impl PathClassifier {
    pub fn new(public: PublicPaths, routes: RouteTable) -> Self {
        Self { public, routes }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public.matches(path)
    }

    /// Classify `path`.
    ///
    /// A path matching no configuration at all requires authentication and
    /// nothing more. Misconfiguration therefore degrades to
    /// "authenticated only", never to a silent deny or an elevated grant.
    pub fn classify(&self, path: &str) -> RouteAccess {
        if self.public.matches(path) {
            return RouteAccess::Public;
        }

        match self.routes.lookup(path) {
            Some(rule) if !rule.roles.is_empty() => RouteAccess::RequiresAnyOf(rule.roles.clone()),
            _ => RouteAccess::AuthenticatedOnly,
        }
    }
}

/// Segment-aware prefix test: `/admin` covers `/admin` and `/admin/users`,
/// never `/administrator`. A bare `/` prefix covers everything.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix == "/" || prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PathClassifier {
        PathClassifier::new(
            PublicPaths::from_patterns(["/", "/login", "/forgot-password/*"]),
            RouteTable::new(vec![
                RouteRule {
                    prefix: "/admin".to_string(),
                    roles: vec![Role::Superadmin, Role::Admin],
                },
                RouteRule {
                    prefix: "/admin/settings".to_string(),
                    roles: vec![Role::Superadmin],
                },
                RouteRule {
                    prefix: "/projects".to_string(),
                    roles: vec![],
                },
            ]),
        )
    }

    #[test]
    fn exact_public_entries_match_exactly() {
        let c = classifier();
        assert_eq!(c.classify("/"), RouteAccess::Public);
        assert_eq!(c.classify("/login"), RouteAccess::Public);
        assert_ne!(c.classify("/login/callback"), RouteAccess::Public);
    }

    #[test]
    fn wildcard_public_entries_cover_subtree() {
        let c = classifier();
        assert_eq!(c.classify("/forgot-password"), RouteAccess::Public);
        assert_eq!(c.classify("/forgot-password/reset/abc123"), RouteAccess::Public);
        assert_ne!(c.classify("/forgot-password-faq"), RouteAccess::Public);
    }

    #[test]
    fn unmatched_paths_require_only_authentication() {
        let c = classifier();
        assert_eq!(c.classify("/tasks/42"), RouteAccess::AuthenticatedOnly);
    }

    #[test]
    fn empty_role_list_means_authenticated_only() {
        let c = classifier();
        assert_eq!(c.classify("/projects/7/board"), RouteAccess::AuthenticatedOnly);
    }

    #[test]
    fn longest_prefix_wins() {
        let c = classifier();
        assert_eq!(
            c.classify("/admin/users"),
            RouteAccess::RequiresAnyOf(vec![Role::Superadmin, Role::Admin])
        );
        assert_eq!(
            c.classify("/admin/settings/billing"),
            RouteAccess::RequiresAnyOf(vec![Role::Superadmin])
        );
    }

    #[test]
    fn prefix_match_respects_segment_boundaries() {
        let c = classifier();
        assert_eq!(c.classify("/administrator"), RouteAccess::AuthenticatedOnly);
        assert_eq!(
            c.classify("/admin"),
            RouteAccess::RequiresAnyOf(vec![Role::Superadmin, Role::Admin])
        );
    }
}
