//! `tasklane-access` — route classification, navigation filtering, and the
//! access guard.
//!
//! Everything here is a pure function of static configuration and an
//! immutable session snapshot. The host router is the only side-effecting
//! consumer, behind the [`Navigator`] seam.

pub mod guard;
pub mod nav;
pub mod routes;

pub use guard::{
    AccessPolicy, Decision, Evaluation, Guard, GuardPaths, GuardState, NavigationCommand,
    Navigator,
};
pub use nav::{NavEntry, NavGroup, NavTree};
pub use routes::{PathClassifier, PublicPaths, PublicPattern, RouteAccess, RouteRule, RouteTable};
