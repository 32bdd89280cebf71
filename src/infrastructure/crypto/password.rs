//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::support::errors::InfraError;

/// One-way credential hashing used when accounts are created or updated.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, InfraError>;
    fn verify(&self, password: &str, hash: &str) -> Result<bool, InfraError>;
}

/// bcrypt with a configurable work factor.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(bcrypt::MIN_COST, bcrypt::MAX_COST),
        }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, InfraError> {
        hash(password, self.cost).map_err(|e| InfraError::Crypto(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, InfraError> {
        verify(password, hash).map_err(|e| InfraError::Crypto(e.to_string()))
    }
}
