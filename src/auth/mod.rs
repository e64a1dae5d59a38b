//! Authentication: password hashing, the credential store, session tokens and the
//! request authorization gate.

pub mod extractors;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

pub use extractors::AuthenticatedUserId;
pub use middleware::{authenticate, AuthMiddleware};
pub use password::Passwords;
pub use service::{register, verify_credentials};
pub use token::{Claims, TokenError, TokenService};
