//! Password verifier for the vault.
//!
//! A verifier is `SHA-256(password || hex(salt))` stored next to its salt. It
//! answers "is this the right password?" without running the KDF and without
//! being convertible into the encryption key.
//!
//! The digest is unstretched: anyone holding the verifier can test guesses at
//! SHA-256 speed rather than PBKDF2 speed.

use ring::constant_time;
use ring::digest::{self, SHA256};
use ring::rand::{SecureRandom, SystemRandom};

use crate::types::errors::CryptoError;
use crate::types::vault_record::{Verifier, HASH_LENGTH, SALT_LENGTH};

/// Trait defining password verification operations.
pub trait PasswordVerifierTrait {
    /// Creates a verifier for `password` with a fresh random salt.
    fn create_verifier(&self, password: &str) -> Result<Verifier, CryptoError>;

    /// Returns true if `password` matches `verifier`. Comparison is constant-time.
    fn check(&self, password: &str, verifier: &Verifier) -> bool;
}

pub struct PasswordVerifier {
    rng: SystemRandom,
}

impl PasswordVerifier {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    fn digest(password: &str, salt: &[u8; SALT_LENGTH]) -> [u8; HASH_LENGTH] {
        let mut ctx = digest::Context::new(&SHA256);
        ctx.update(password.as_bytes());
        ctx.update(hex::encode(salt).as_bytes());

        let mut hash = [0u8; HASH_LENGTH];
        hash.copy_from_slice(ctx.finish().as_ref());
        hash
    }
}

impl Default for PasswordVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordVerifierTrait for PasswordVerifier {
    fn create_verifier(&self, password: &str) -> Result<Verifier, CryptoError> {
        let mut salt = [0u8; SALT_LENGTH];
        self.rng
            .fill(&mut salt)
            .map_err(|_| CryptoError::RandomGeneration("Failed to generate salt".to_string()))?;

        Ok(Verifier {
            hash: Self::digest(password, &salt),
            salt,
        })
    }

    fn check(&self, password: &str, verifier: &Verifier) -> bool {
        let computed = Self::digest(password, &verifier.salt);
        constant_time::verify_slices_are_equal(&computed, &verifier.hash).is_ok()
    }
}
