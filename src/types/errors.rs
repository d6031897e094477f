use std::fmt;

// === CryptoError ===

/// Errors related to cryptographic operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Failed to derive encryption key from password.
    KeyDerivation(String),
    /// Encryption operation failed.
    Encryption(String),
    /// Authentication tag mismatch: wrong password or tampered ciphertext.
    DecryptionFailed,
    /// Failed to generate random bytes.
    RandomGeneration(String),
    /// The provided key is invalid.
    InvalidKey(String),
    /// A salt, IV or ciphertext has the wrong shape.
    InvalidInput(String),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::KeyDerivation(msg) => write!(f, "Key derivation failed: {}", msg),
            CryptoError::Encryption(msg) => write!(f, "Encryption failed: {}", msg),
            CryptoError::DecryptionFailed => {
                write!(f, "Decryption failed: wrong password or corrupted data")
            }
            CryptoError::RandomGeneration(msg) => {
                write!(f, "Random generation failed: {}", msg)
            }
            CryptoError::InvalidKey(msg) => write!(f, "Invalid key: {}", msg),
            CryptoError::InvalidInput(msg) => write!(f, "Invalid crypto input: {}", msg),
        }
    }
}

impl std::error::Error for CryptoError {}

// === StoreError ===

/// Errors related to the persisted vault record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Database operation failed.
    Database(String),
    /// A stored entry could not be parsed back into a record.
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(msg) => write!(f, "Vault store database error: {}", msg),
            StoreError::Corrupt(msg) => write!(f, "Vault store entry is corrupt: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === VaultError ===

/// Errors returned by the vault session to its caller.
///
/// Every failure leaves the session in a well-defined state: `Locked` or
/// `Unlocked`, whichever it was in before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// Setup input fails the length or confirmation rule.
    PolicyViolation(String),
    /// Login attempted before any vault was set up.
    NotInitialized,
    /// Setup attempted while a vault already exists.
    AlreadyInitialized,
    /// The password does not match the stored verifier.
    InvalidCredentials,
    /// The verifier passed but the encrypted blob could not be opened.
    VaultCorrupted(String),
    /// Malformed input to a secret operation.
    ValidationError(String),
    /// The operation is not allowed in the current session state.
    NotPermitted(String),
    /// The persistence layer failed.
    Storage(String),
    /// Encrypting the collection failed.
    Crypto(String),
}

impl VaultError {
    /// Stable machine-readable name of the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            VaultError::PolicyViolation(_) => "PolicyViolation",
            VaultError::NotInitialized => "NotInitialized",
            VaultError::AlreadyInitialized => "AlreadyInitialized",
            VaultError::InvalidCredentials => "InvalidCredentials",
            VaultError::VaultCorrupted(_) => "VaultCorrupted",
            VaultError::ValidationError(_) => "ValidationError",
            VaultError::NotPermitted(_) => "NotPermitted",
            VaultError::Storage(_) => "Storage",
            VaultError::Crypto(_) => "Crypto",
        }
    }
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::PolicyViolation(msg) => write!(f, "Password policy violation: {}", msg),
            VaultError::NotInitialized => write!(f, "Vault has not been set up"),
            VaultError::AlreadyInitialized => write!(f, "Vault is already set up"),
            VaultError::InvalidCredentials => write!(f, "Incorrect password"),
            VaultError::VaultCorrupted(msg) => {
                write!(f, "Vault data is corrupted: {}", msg)
            }
            VaultError::ValidationError(msg) => write!(f, "Invalid input: {}", msg),
            VaultError::NotPermitted(msg) => write!(f, "Operation not permitted: {}", msg),
            VaultError::Storage(msg) => write!(f, "Vault storage error: {}", msg),
            VaultError::Crypto(msg) => write!(f, "Vault crypto error: {}", msg),
        }
    }
}

impl std::error::Error for VaultError {}

impl From<StoreError> for VaultError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Database(msg) => VaultError::Storage(msg),
            StoreError::Corrupt(msg) => VaultError::VaultCorrupted(msg),
        }
    }
}
