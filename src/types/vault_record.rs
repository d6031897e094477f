use serde::{Deserialize, Serialize};

/// Salt length in bytes for both the KDF and the verifier digest.
pub const SALT_LENGTH: usize = 16;

/// AES-256-GCM nonce/IV length in bytes.
pub const NONCE_LENGTH: usize = 12;

/// SHA-256 output length in bytes.
pub const HASH_LENGTH: usize = 32;

/// One complete encryption of the serialized secret collection.
///
/// `cipher_text` carries the GCM authentication tag in its last 16 bytes.
/// A blob is never updated in place; every save produces a new one with a
/// fresh salt and IV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBlob {
    #[serde(rename = "cipherText", with = "hex")]
    pub cipher_text: Vec<u8>,
    #[serde(with = "hex")]
    pub iv: [u8; NONCE_LENGTH],
    #[serde(with = "hex")]
    pub salt: [u8; SALT_LENGTH],
}

/// Stored proof-of-knowledge of the vault password.
///
/// Independent of the encryption key: it is a salted digest, not a KDF output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verifier {
    #[serde(with = "hex")]
    pub hash: [u8; HASH_LENGTH],
    #[serde(with = "hex")]
    pub salt: [u8; SALT_LENGTH],
}

/// The persisted vault: verifier plus the optional encrypted collection.
///
/// `blob` is `None` only between setup and the first saved secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedVaultRecord {
    pub verifier: Verifier,
    pub blob: Option<EncryptedBlob>,
}
