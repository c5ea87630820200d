//! `tasklane-auth` — identity and role model for the access-control layer.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod resolver;
pub mod roles;
pub mod session;
pub mod token;
pub mod user;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use resolver::{has_role, holds_any, role_set};
pub use roles::Role;
pub use session::{Session, SessionSnapshot};
pub use token::{Hs256TokenCodec, TokenCodec, TokenError};
pub use user::{RoleAssignment, User, UserStatus};
