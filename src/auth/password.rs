use crate::error::AppError;
use bcrypt::{hash, verify};

/// Password hashing for the credential store.
///
/// Holds a throwaway hash computed at the configured cost so that a login for an
/// unknown username still performs one full bcrypt verification.
#[derive(Clone)]
pub struct Passwords {
    cost: u32,
    dummy_hash: String,
}

impl Passwords {
    pub fn new(cost: u32) -> Result<Self, AppError> {
        let dummy_hash = hash("dummy-password-for-unknown-users", cost).map_err(|e| {
            AppError::InternalServerError(format!("Failed to hash password: {}", e))
        })?;
        Ok(Self { cost, dummy_hash })
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
    }

    /// Checks `password` against `stored`; a missing hash costs the same and never matches.
    pub fn verify(&self, password: &str, stored: Option<&str>) -> Result<bool, AppError> {
        let matched = verify(password, stored.unwrap_or(&self.dummy_hash)).map_err(|e| {
            AppError::InternalServerError(format!("Failed to verify password: {}", e))
        })?;
        Ok(matched && stored.is_some())
    }
}
