//! Vault session for SecureVault.
//!
//! Owns the session state machine and the in-memory secret collection:
//!
//! ```text
//! Uninitialized --setup--> Locked --login--> Unlocked
//!                            ^                  |
//!                            +------logout------+
//! ```
//!
//! Once a verifier exists in storage the session never returns to
//! `Uninitialized` except through [`VaultSession::wipe`].
//!
//! The session takes `&mut self` for every transition, so a caller sharing it
//! across threads must wrap it in a `Mutex` (see [`crate::app::App`]).

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

use crate::database::vault_store::VaultStoreTrait;
use crate::services::crypto_service::{CryptoService, CryptoServiceTrait};
use crate::services::password_verifier::{PasswordVerifier, PasswordVerifierTrait};
use crate::types::errors::VaultError;
use crate::types::secret::Secret;
use crate::types::settings::{SecuritySettings, DEFAULT_MIN_PASSWORD_LENGTH};
use crate::types::vault_record::{PersistedVaultRecord, Verifier};

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultState {
    Uninitialized,
    Locked,
    Unlocked,
}

/// Password rules enforced by setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultPolicy {
    pub min_password_length: usize,
}

impl Default for VaultPolicy {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl From<&SecuritySettings> for VaultPolicy {
    fn from(settings: &SecuritySettings) -> Self {
        Self {
            min_password_length: settings.min_password_length,
        }
    }
}

/// Working material held only while unlocked. Dropping it wipes the
/// password and every secret's content.
struct UnlockedVault {
    password: Zeroizing<String>,
    verifier: Verifier,
    secrets: Vec<Secret>,
}

enum SessionState {
    Uninitialized,
    Locked,
    Unlocked(UnlockedVault),
}

/// The vault state machine and its in-memory secret collection.
pub struct VaultSession {
    store: Box<dyn VaultStoreTrait>,
    crypto: CryptoService,
    verifier: PasswordVerifier,
    policy: VaultPolicy,
    state: SessionState,
}

impl VaultSession {
    /// Opens a session over `store`. The initial state is `Locked` if a
    /// verifier is already persisted, `Uninitialized` otherwise.
    ///
    /// # Errors
    /// Returns `VaultError::Storage` if the store cannot be queried.
    pub fn open(
        store: Box<dyn VaultStoreTrait>,
        crypto: CryptoService,
        policy: VaultPolicy,
    ) -> Result<Self, VaultError> {
        let state = if store.exists()? {
            SessionState::Locked
        } else {
            SessionState::Uninitialized
        };

        Ok(Self {
            store,
            crypto,
            verifier: PasswordVerifier::new(),
            policy,
            state,
        })
    }

    pub fn state(&self) -> VaultState {
        match self.state {
            SessionState::Uninitialized => VaultState::Uninitialized,
            SessionState::Locked => VaultState::Locked,
            SessionState::Unlocked(_) => VaultState::Unlocked,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self.state, SessionState::Unlocked(_))
    }

    pub fn policy(&self) -> &VaultPolicy {
        &self.policy
    }

    /// One-time vault creation. `Uninitialized -> Locked`.
    ///
    /// Persists only the verifier; the secret collection stays absent
    /// until the first secret is added.
    pub fn setup(&mut self, password: &str, confirm: &str) -> Result<(), VaultError> {
        if !matches!(self.state, SessionState::Uninitialized) || self.store.exists()? {
            return Err(VaultError::AlreadyInitialized);
        }

        if password.chars().count() < self.policy.min_password_length {
            return Err(VaultError::PolicyViolation(format!(
                "password too short (min {} chars)",
                self.policy.min_password_length
            )));
        }
        if password != confirm {
            return Err(VaultError::PolicyViolation(
                "passwords do not match".to_string(),
            ));
        }

        let verifier = self
            .verifier
            .create_verifier(password)
            .map_err(|e| VaultError::Crypto(e.to_string()))?;
        self.store.save(&PersistedVaultRecord {
            verifier,
            blob: None,
        })?;

        self.state = SessionState::Locked;
        info!("vault initialized");
        Ok(())
    }

    /// Checks `password` against the stored verifier and, on success,
    /// decrypts the secret collection. `Locked -> Unlocked`.
    ///
    /// On any failure the session stays `Locked`.
    pub fn login(&mut self, password: &str) -> Result<(), VaultError> {
        if self.is_unlocked() {
            return Err(VaultError::NotPermitted(
                "vault is already unlocked".to_string(),
            ));
        }

        let record = match self.store.load() {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.state = SessionState::Uninitialized;
                return Err(VaultError::NotInitialized);
            }
            Err(e) => {
                let err = VaultError::from(e);
                if let VaultError::VaultCorrupted(msg) = &err {
                    error!(reason = %msg, "stored vault record is unreadable");
                }
                return Err(err);
            }
        };
        self.state = SessionState::Locked;

        if !self.verifier.check(password, &record.verifier) {
            warn!("login rejected: incorrect password");
            return Err(VaultError::InvalidCredentials);
        }

        let secrets = match &record.blob {
            None => Vec::new(),
            Some(blob) => {
                let plaintext = self.crypto.decrypt(blob, password).map_err(|e| {
                    error!(reason = %e, "verifier accepted password but vault blob failed to decrypt");
                    VaultError::VaultCorrupted(e.to_string())
                })?;
                serde_json::from_slice::<Vec<Secret>>(&plaintext).map_err(|e| {
                    error!(reason = %e, "decrypted vault blob is not a secret collection");
                    VaultError::VaultCorrupted(format!("invalid secret collection: {}", e))
                })?
            }
        };

        info!(count = secrets.len(), "vault unlocked");
        self.state = SessionState::Unlocked(UnlockedVault {
            password: Zeroizing::new(password.to_string()),
            verifier: record.verifier,
            secrets,
        });
        Ok(())
    }

    /// Discards the session password and secret collection. `Unlocked -> Locked`.
    ///
    /// No effect in any other state.
    pub fn logout(&mut self) {
        if self.is_unlocked() {
            self.state = SessionState::Locked;
            info!("vault locked");
        }
    }

    /// Prepends a new secret and re-encrypts the whole collection before
    /// returning. If persisting fails the collection is left unchanged.
    pub fn add_secret(&mut self, title: &str, content: &str) -> Result<&Secret, VaultError> {
        let SessionState::Unlocked(vault) = &mut self.state else {
            return Err(VaultError::NotPermitted("vault is locked".to_string()));
        };

        if title.is_empty() {
            return Err(VaultError::ValidationError("title is required".to_string()));
        }
        if content.is_empty() {
            return Err(VaultError::ValidationError("content is required".to_string()));
        }

        vault.secrets.insert(0, Secret::new(title, content));
        if let Err(e) = persist(&*self.store, &self.crypto, vault) {
            vault.secrets.remove(0);
            return Err(e);
        }

        debug!(count = vault.secrets.len(), "secret added");
        Ok(&vault.secrets[0])
    }

    /// Secrets whose title or content contains `query`, case-insensitively,
    /// in collection order. An empty query returns everything.
    pub fn search(&self, query: &str) -> Result<Vec<&Secret>, VaultError> {
        let secrets = self.secrets()?;
        if query.is_empty() {
            return Ok(secrets.iter().collect());
        }
        let needle = query.to_lowercase();
        Ok(secrets.iter().filter(|s| s.matches(&needle)).collect())
    }

    /// The full collection, newest first.
    pub fn secrets(&self) -> Result<&[Secret], VaultError> {
        match &self.state {
            SessionState::Unlocked(vault) => Ok(&vault.secrets),
            _ => Err(VaultError::NotPermitted("vault is locked".to_string())),
        }
    }

    pub fn secret_count(&self) -> Result<usize, VaultError> {
        self.secrets().map(<[Secret]>::len)
    }

    /// Deletes the persisted record entirely. `Unlocked -> Uninitialized`.
    ///
    /// Only allowed while unlocked.
    pub fn wipe(&mut self) -> Result<(), VaultError> {
        if !self.is_unlocked() {
            return Err(VaultError::NotPermitted("vault is locked".to_string()));
        }
        self.store.clear()?;
        self.state = SessionState::Uninitialized;
        warn!("vault wiped");
        Ok(())
    }
}

/// Exact JSON length of `secrets`, measured without buffering the text.
fn serialized_len(secrets: &[Secret]) -> Result<usize, VaultError> {
    struct Counter(usize);

    impl std::io::Write for Counter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0 += buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut counter = Counter(0);
    serde_json::to_writer(&mut counter, secrets)
        .map_err(|e| VaultError::Crypto(format!("failed to serialize secrets: {}", e)))?;
    Ok(counter.0)
}

fn persist(
    store: &dyn VaultStoreTrait,
    crypto: &CryptoService,
    vault: &UnlockedVault,
) -> Result<(), VaultError> {
    let mut plaintext = Zeroizing::new(Vec::with_capacity(serialized_len(&vault.secrets)?));
    serde_json::to_writer(&mut *plaintext, &vault.secrets)
        .map_err(|e| VaultError::Crypto(format!("failed to serialize secrets: {}", e)))?;
    let blob = crypto
        .encrypt(&plaintext, &vault.password)
        .map_err(|e| VaultError::Crypto(e.to_string()))?;

    store.save(&PersistedVaultRecord {
        verifier: vault.verifier.clone(),
        blob: Some(blob),
    })?;
    Ok(())
}
