//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation against the shared secret.
//! - [`extract`] -- the [`extract::AuthUser`] handler extractor.
//!
//! Tokens are issued by an external identity provider; this service only
//! validates them and scopes data access to the authenticated owner.

pub mod extract;
pub mod jwt;

pub use extract::AuthUser;
