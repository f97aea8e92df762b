//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by an access token.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireReviewer`] -- requires `reviewer` or `admin`.

pub mod auth;
pub mod rbac;
