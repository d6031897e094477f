//! App Core for SecureVault.
//!
//! Wires the database, settings and vault session together.

use std::sync::Arc;

use crate::database::connection::Database;
use crate::database::vault_store::SqliteVaultStore;
use crate::services::crypto_service::CryptoService;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::vault_session::{VaultPolicy, VaultSession};
use crate::types::settings::VaultSettings;

/// Central application struct.
///
/// Callers share it behind a `Mutex`, which serialises every vault
/// transition (no `add_secret` can interleave with `logout`).
pub struct App {
    pub settings_engine: SettingsEngine,
    pub vault: VaultSession,
}

impl App {
    /// Creates an App from an already loaded settings engine.
    ///
    /// If `db_path` is `None`, the database path comes from the settings.
    pub fn with_settings(
        settings_engine: SettingsEngine,
        db_path: Option<&str>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let path = match db_path {
            Some(p) => std::path::PathBuf::from(p),
            None => settings_engine.database_path(),
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::open(&path)?;
        let vault = Self::open_vault(db, settings_engine.get_settings())?;

        Ok(Self {
            settings_engine,
            vault,
        })
    }

    /// Creates an App over an in-memory database.
    pub fn in_memory(settings_engine: SettingsEngine) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open_in_memory()?;
        let vault = Self::open_vault(db, settings_engine.get_settings())?;
        Ok(Self {
            settings_engine,
            vault,
        })
    }

    fn open_vault(
        db: Database,
        settings: &VaultSettings,
    ) -> Result<VaultSession, Box<dyn std::error::Error>> {
        let crypto = CryptoService::with_iterations(settings.security.kdf_iterations)?;
        let store = SqliteVaultStore::new(Arc::new(db));
        let vault = VaultSession::open(
            Box::new(store),
            crypto,
            VaultPolicy::from(&settings.security),
        )?;
        Ok(vault)
    }
}
