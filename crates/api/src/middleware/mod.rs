//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`]: the authenticated user behind a JWT Bearer token.
//! - [`rbac::RequireAdmin`], [`rbac::RequireUstaz`], [`rbac::RequireStudent`]:
//!   reject callers whose role does not match.

pub mod auth;
pub mod rbac;
