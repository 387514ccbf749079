//! Auth Adapters - password hashing and access tokens

mod jwt;
mod password;

pub use jwt::{generate_secret, AccessClaims, JwtTokenService};
pub use password::Argon2PasswordHasher;
