use serde::{Deserialize, Serialize};

/// PBKDF2-HMAC-SHA256 iteration count used when nothing else is configured.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Minimum vault password length (in characters) accepted by setup.
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 4;

/// Top-level vault settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct VaultSettings {
    pub security: SecuritySettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

/// Key-stretching and password policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SecuritySettings {
    pub kdf_iterations: u32,
    pub min_password_length: usize,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

/// Where the vault database lives. `None` means the platform data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StorageSettings {
    pub database_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
