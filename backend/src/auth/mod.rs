//! Authentication module
//!
//! Provides JWT-based authentication, argon2 password hashing and the
//! role-checking request extractors.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{
    authenticate, bearer_token, require_role, AdminUser, ApplicantUser, AuthUser,
};
pub use password::PasswordService;
