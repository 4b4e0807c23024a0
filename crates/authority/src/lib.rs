//! Development login authority for the HR portal
//!
//! Serves `POST /auth/login`, checking credentials against a small user
//! directory and issuing HS256 session tokens the session guard accepts.

mod config;
mod crypto;
mod error;
mod extractors;
mod issuer;
mod routes;
mod users;

pub use config::AuthorityConfig;
pub use crypto::{hash_password, verify_password};
pub use error::AuthorityError;
pub use extractors::ValidatedJson;
pub use issuer::{IssuedToken, TokenIssuer};
pub use routes::{routes, AuthorityState, LoginBody, LoginResponse};
pub use users::{DirectoryUser, UserDirectory};
