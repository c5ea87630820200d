//! Session/identity provider.
//!
//! Owns the current user snapshot plus the initialization/loading flags.
//! The guard never reads the provider directly; it consumes an immutable
//! [`SessionSnapshot`] per evaluation.

use serde::{Deserialize, Serialize};

use crate::User;

/// Immutable view of the session at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_initialized: bool,
    pub loading: bool,
}

impl SessionSnapshot {
    /// Fully initialized snapshot with no authenticated user.
    pub fn anonymous() -> Self {
        Self {
            user: None,
            is_initialized: true,
            loading: false,
        }
    }

    /// Fully initialized snapshot for an authenticated user.
    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            is_initialized: true,
            loading: false,
        }
    }

    /// Snapshot taken before the identity provider has finished its
    /// initial load.
    pub fn warming() -> Self {
        Self {
            user: None,
            is_initialized: false,
            loading: true,
        }
    }
}

/// The identity provider: current user + loading lifecycle.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
    is_initialized: bool,
    loading: bool,
}

impl Session {
    /// Fresh session; nothing loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the initial identity restore as in flight.
    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Complete initialization with the restored user, if any.
    pub fn finish_initialization(&mut self, user: Option<User>) {
        self.user = user;
        self.is_initialized = true;
        self.loading = false;
    }

    /// Replace the current identity after a successful login.
    pub fn login(&mut self, user: User) {
        self.user = Some(user);
        self.is_initialized = true;
        self.loading = false;
    }

    /// Discard the current identity.
    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Immutable view for a single guard evaluation.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            is_initialized: self.is_initialized,
            loading: self.loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, UserStatus};
    use tasklane_core::UserId;

    fn user() -> User {
        User::with_roles(
            UserId::new(),
            "Frank",
            "frank@example.com",
            UserStatus::Active,
            [Role::User],
        )
    }

    #[test]
    fn fresh_session_is_uninitialized() {
        let session = Session::new();
        let snapshot = session.snapshot();

        assert!(snapshot.user.is_none());
        assert!(!snapshot.is_initialized);
        assert!(!snapshot.loading);
    }

    #[test]
    fn initialization_lifecycle() {
        let mut session = Session::new();
        session.begin_loading();
        assert!(session.snapshot().loading);

        session.finish_initialization(Some(user()));
        let snapshot = session.snapshot();
        assert!(snapshot.is_initialized);
        assert!(!snapshot.loading);
        assert!(snapshot.user.is_some());
    }

    #[test]
    fn login_then_logout_discards_identity() {
        let mut session = Session::new();
        session.login(user());
        assert!(session.user().is_some());

        session.logout();
        assert!(session.user().is_none());
        // Initialization survives logout; the session is known-anonymous.
        assert!(session.snapshot().is_initialized);
    }
}
