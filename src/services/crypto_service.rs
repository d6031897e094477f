use ring::aead::{self, Aad, BoundKey, Nonce, NonceSequence, UnboundKey, AES_256_GCM};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::types::errors::CryptoError;
use crate::types::settings::DEFAULT_KDF_ITERATIONS;
use crate::types::vault_record::{EncryptedBlob, NONCE_LENGTH, SALT_LENGTH};

/// AES-256-GCM key length in bytes.
pub const KEY_LENGTH: usize = 32;

/// AES-256-GCM authentication tag length in bytes.
pub const TAG_LENGTH: usize = 16;

/// A 256-bit AES key derived from a password. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_LENGTH]);

impl SymmetricKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

/// Trait defining the vault's cryptographic operations.
pub trait CryptoServiceTrait {
    /// Derives an AES-256 key from a password and salt using PBKDF2-HMAC-SHA256.
    ///
    /// Deterministic for a fixed (password, salt, iteration count).
    fn derive_key(&self, password: &str, salt: &[u8; SALT_LENGTH]) -> SymmetricKey;

    /// Encrypts `plaintext` under `password` with a fresh random salt and IV.
    fn encrypt(&self, plaintext: &[u8], password: &str) -> Result<EncryptedBlob, CryptoError>;

    /// Decrypts a blob produced by [`CryptoServiceTrait::encrypt`].
    ///
    /// A wrong password and a tampered blob both yield
    /// [`CryptoError::DecryptionFailed`]; no partial plaintext is returned.
    fn decrypt(&self, blob: &EncryptedBlob, password: &str)
        -> Result<Zeroizing<Vec<u8>>, CryptoError>;

    /// Generates a cryptographically secure random salt.
    fn generate_salt(&self) -> Result<[u8; SALT_LENGTH], CryptoError>;
}

/// A nonce sequence that uses a single nonce value.
/// Used for one-shot encryption/decryption operations.
struct SingleNonce {
    nonce: Option<[u8; NONCE_LENGTH]>,
}

impl SingleNonce {
    fn new(nonce_bytes: [u8; NONCE_LENGTH]) -> Self {
        Self {
            nonce: Some(nonce_bytes),
        }
    }
}

impl NonceSequence for SingleNonce {
    fn advance(&mut self) -> Result<Nonce, ring::error::Unspecified> {
        self.nonce
            .take()
            .map(Nonce::assume_unique_for_key)
            .ok_or(ring::error::Unspecified)
    }
}

/// Implementation of the vault cryptography using the `ring` crate.
pub struct CryptoService {
    rng: SystemRandom,
    iterations: NonZeroU32,
}

impl CryptoService {
    /// Creates a CryptoService with the default PBKDF2 work factor.
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
            iterations: NonZeroU32::new(DEFAULT_KDF_ITERATIONS).unwrap_or(NonZeroU32::MIN),
        }
    }

    /// Creates a CryptoService with a custom PBKDF2 iteration count.
    ///
    /// # Errors
    /// Returns `CryptoError::KeyDerivation` if `iterations` is zero.
    pub fn with_iterations(iterations: u32) -> Result<Self, CryptoError> {
        let iterations = NonZeroU32::new(iterations)
            .ok_or_else(|| CryptoError::KeyDerivation("Invalid iteration count".to_string()))?;
        Ok(Self {
            rng: SystemRandom::new(),
            iterations,
        })
    }

    /// Returns the configured PBKDF2 iteration count.
    pub fn iterations(&self) -> u32 {
        self.iterations.get()
    }

    fn random_nonce(&self) -> Result<[u8; NONCE_LENGTH], CryptoError> {
        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| CryptoError::RandomGeneration("Failed to generate nonce".to_string()))?;
        Ok(nonce_bytes)
    }
}

impl Default for CryptoService {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoServiceTrait for CryptoService {
    fn derive_key(&self, password: &str, salt: &[u8; SALT_LENGTH]) -> SymmetricKey {
        let mut key = SymmetricKey([0u8; KEY_LENGTH]);
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            self.iterations,
            salt,
            password.as_bytes(),
            &mut key.0,
        );
        key
    }

    fn encrypt(&self, plaintext: &[u8], password: &str) -> Result<EncryptedBlob, CryptoError> {
        let salt = self.generate_salt()?;
        let nonce_bytes = self.random_nonce()?;
        let key = self.derive_key(password, &salt);

        let unbound_key = UnboundKey::new(&AES_256_GCM, key.as_bytes())
            .map_err(|_| CryptoError::InvalidKey("Failed to create encryption key".to_string()))?;
        let mut sealing_key = aead::SealingKey::new(unbound_key, SingleNonce::new(nonce_bytes));

        // Sized for the appended tag so the plaintext copy never reallocates.
        let mut in_out = Zeroizing::new(Vec::with_capacity(plaintext.len() + TAG_LENGTH));
        in_out.extend_from_slice(plaintext);
        sealing_key
            .seal_in_place_append_tag(Aad::empty(), &mut *in_out)
            .map_err(|_| CryptoError::Encryption("Encryption operation failed".to_string()))?;

        Ok(EncryptedBlob {
            cipher_text: std::mem::take(&mut *in_out),
            iv: nonce_bytes,
            salt,
        })
    }

    fn decrypt(
        &self,
        blob: &EncryptedBlob,
        password: &str,
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        if blob.cipher_text.len() < TAG_LENGTH {
            return Err(CryptoError::InvalidInput(format!(
                "Ciphertext must be at least {} bytes, got {}",
                TAG_LENGTH,
                blob.cipher_text.len()
            )));
        }

        let key = self.derive_key(password, &blob.salt);
        let unbound_key = UnboundKey::new(&AES_256_GCM, key.as_bytes())
            .map_err(|_| CryptoError::InvalidKey("Failed to create decryption key".to_string()))?;
        let mut opening_key = aead::OpeningKey::new(unbound_key, SingleNonce::new(blob.iv));

        let mut in_out = Zeroizing::new(blob.cipher_text.clone());
        let plaintext_len = opening_key
            .open_in_place(Aad::empty(), &mut in_out)
            .map_err(|_| CryptoError::DecryptionFailed)?
            .len();
        in_out.truncate(plaintext_len);

        Ok(in_out)
    }

    fn generate_salt(&self) -> Result<[u8; SALT_LENGTH], CryptoError> {
        let mut salt = [0u8; SALT_LENGTH];
        self.rng
            .fill(&mut salt)
            .map_err(|_| CryptoError::RandomGeneration("Failed to generate salt".to_string()))?;
        Ok(salt)
    }
}
