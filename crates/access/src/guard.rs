//! Access guard: decides render vs redirect for every navigation.
//!
//! Policy is decoupled from navigation mechanics. [`AccessPolicy::evaluate`]
//! is a pure function of `(session snapshot, path)` returning a [`Decision`]
//! value; it is consumed once per state change, both for the render decision
//! and for the navigation side effect. The host performs navigation through
//! the [`Navigator`] seam and nowhere else.

use serde::{Deserialize, Serialize};

use tasklane_auth::{SessionSnapshot, holds_any};

use crate::routes::{PathClassifier, RouteAccess};

/// Guard lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuardState {
    /// No evaluation has happened yet.
    Uninitialized,
    /// The session is still initializing or loading.
    Checking,
    /// Access granted; children render.
    Granted,
    /// Access denied; a redirect was issued and nothing renders.
    DeniedRedirecting,
    /// The fallback is on screen while the session keeps warming.
    RenderingFallback,
}

/// A navigation command for the host router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationCommand {
    /// Redirect target path.
    pub target: String,
    /// Originally requested path, preserved so the user can be sent back
    /// after completing the required action. Stored raw; encoded on output.
    pub return_url: Option<String>,
}

impl NavigationCommand {
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            return_url: None,
        }
    }

    pub fn with_return(target: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            return_url: Some(original.into()),
        }
    }

    /// Full location including the URL-encoded `returnUrl` parameter.
    pub fn location(&self) -> String {
        match &self.return_url {
            Some(original) => {
                format!("{}?returnUrl={}", self.target, urlencoding::encode(original))
            }
            None => self.target.clone(),
        }
    }
}

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Render children.
    Grant,
    /// Render the supplied fallback (session still warming).
    RenderFallback,
    /// Render nothing; navigate.
    Redirect(NavigationCommand),
}

/// Reserved guard target paths (static configuration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardPaths {
    /// Where unauthenticated users are sent.
    pub login: String,
    /// Where authenticated-but-unauthorized users are sent.
    pub forbidden: String,
    /// Where non-active accounts are sent.
    pub inactive: String,
    /// Default landing page for authenticated users.
    pub landing: String,
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            forbidden: "/forbidden".to_string(),
            inactive: "/inactive-account".to_string(),
            landing: "/dashboard".to_string(),
        }
    }
}

/// The state the guard lands in plus the decision the host renders by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub state: GuardState,
    pub decision: Decision,
}

impl Evaluation {
    fn checking() -> Self {
        Self {
            state: GuardState::Checking,
            decision: Decision::RenderFallback,
        }
    }

    fn granted() -> Self {
        Self {
            state: GuardState::Granted,
            decision: Decision::Grant,
        }
    }

    fn redirect(command: NavigationCommand) -> Self {
        Self {
            state: GuardState::DeniedRedirecting,
            decision: Decision::Redirect(command),
        }
    }
}

/// Access policy: path classifier + reserved paths.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    pub classifier: PathClassifier,
    pub paths: GuardPaths,
}

impl AccessPolicy {
    pub fn new(classifier: PathClassifier, paths: GuardPaths) -> Self {
        Self { classifier, paths }
    }

    /// Evaluate access for `path` under `snapshot`.
    ///
    /// Pure and total: equal inputs produce equal evaluations, and every
    /// input produces exactly one of grant / fallback / redirect.
    pub fn evaluate(&self, snapshot: &SessionSnapshot, path: &str) -> Evaluation {
        if !snapshot.is_initialized || snapshot.loading {
            return Evaluation::checking();
        }

        let access = self.classifier.classify(path);

        let Some(user) = snapshot.user.as_ref() else {
            return match access {
                RouteAccess::Public => Evaluation::granted(),
                _ => {
                    // The root path carries no information worth returning to.
                    let command = if path == "/" {
                        NavigationCommand::to(&self.paths.login)
                    } else {
                        NavigationCommand::with_return(&self.paths.login, path)
                    };
                    Evaluation::redirect(command)
                }
            };
        };

        if access == RouteAccess::Public {
            // Logged-in users never see public-only pages such as login.
            return Evaluation::redirect(NavigationCommand::to(&self.paths.landing));
        }

        if !user.status.is_active() {
            return Evaluation::redirect(NavigationCommand::to(&self.paths.inactive));
        }

        match access {
            RouteAccess::RequiresAnyOf(required) if !holds_any(Some(user), &required) => {
                Evaluation::redirect(NavigationCommand::with_return(&self.paths.forbidden, path))
            }
            _ => Evaluation::granted(),
        }
    }
}

/// Host-router seam: the only consumer of navigation commands.
pub trait Navigator {
    fn redirect(&mut self, command: &NavigationCommand);
}

/// Stateful guard wrapper for event-driven hosts.
///
/// Re-evaluates from current truth on every observation. An unchanged
/// evaluation issues no duplicate navigation; a changed one supersedes the
/// previous redirect (there is no cancellation).
#[derive(Debug)]
pub struct Guard {
    policy: AccessPolicy,
    state: GuardState,
    last: Option<Evaluation>,
}

impl Guard {
    pub fn new(policy: AccessPolicy) -> Self {
        Self {
            policy,
            state: GuardState::Uninitialized,
            last: None,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Re-evaluate after a session or path change.
    ///
    /// Returns the decision the host should render by.
    pub fn observe(
        &mut self,
        snapshot: &SessionSnapshot,
        path: &str,
        navigator: &mut dyn Navigator,
    ) -> Decision {
        let evaluation = self.policy.evaluate(snapshot, path);

        if self.last.as_ref() == Some(&evaluation) {
            // Unchanged inputs: same state, no duplicate navigation.
            return evaluation.decision;
        }

        if let Decision::Redirect(command) = &evaluation.decision {
            navigator.redirect(command);
        }

        self.state = evaluation.state;
        self.last = Some(evaluation.clone());
        evaluation.decision
    }

    /// Host acknowledgement that the warming fallback actually mounted.
    pub fn mark_fallback_rendered(&mut self) {
        if self.state == GuardState::Checking {
            self.state = GuardState::RenderingFallback;
        }
    }
}
