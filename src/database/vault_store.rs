//! Persistence of the vault record.
//!
//! The record is kept as two text entries in `vault_entries`: `verifier` and
//! `blob`, each a JSON object whose binary fields are hex strings. The store
//! does no cryptography; it writes back exactly what it is given.

use std::sync::Arc;

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;

use crate::database::connection::Database;
use crate::types::errors::StoreError;
use crate::types::vault_record::{EncryptedBlob, PersistedVaultRecord, Verifier};

const VERIFIER_KEY: &str = "verifier";
const BLOB_KEY: &str = "blob";

/// Trait defining the vault record persistence interface.
pub trait VaultStoreTrait {
    /// Loads the record, or `None` if no vault has been set up.
    fn load(&self) -> Result<Option<PersistedVaultRecord>, StoreError>;

    /// Replaces the stored record. Verifier and blob are written atomically.
    fn save(&self, record: &PersistedVaultRecord) -> Result<(), StoreError>;

    /// Returns true if a verifier is stored.
    fn exists(&self) -> Result<bool, StoreError>;

    /// Deletes the whole record, leaving no copy of it in the file.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Vault store backed by the SQLite `vault_entries` table.
pub struct SqliteVaultStore {
    db: Arc<Database>,
}

impl SqliteVaultStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn read_entry(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM vault_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn parse_entry<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, StoreError> {
        serde_json::from_str(raw)
            .map_err(|e| StoreError::Corrupt(format!("{} entry: {}", key, e)))
    }

    fn encode_entry<T: serde::Serialize>(key: &str, value: &T) -> Result<String, StoreError> {
        serde_json::to_string(value)
            .map_err(|e| StoreError::Corrupt(format!("{} entry: {}", key, e)))
    }
}

impl VaultStoreTrait for SqliteVaultStore {
    fn load(&self) -> Result<Option<PersistedVaultRecord>, StoreError> {
        let Some(raw_verifier) = self.read_entry(VERIFIER_KEY)? else {
            return Ok(None);
        };
        let verifier: Verifier = Self::parse_entry(VERIFIER_KEY, &raw_verifier)?;

        // An empty blob entry means "set up, nothing saved yet".
        let blob = match self.read_entry(BLOB_KEY)? {
            Some(raw) if !raw.trim().is_empty() => {
                Some(Self::parse_entry::<EncryptedBlob>(BLOB_KEY, &raw)?)
            }
            _ => None,
        };

        Ok(Some(PersistedVaultRecord { verifier, blob }))
    }

    fn save(&self, record: &PersistedVaultRecord) -> Result<(), StoreError> {
        let verifier_json = Self::encode_entry(VERIFIER_KEY, &record.verifier)?;
        let blob_json = record
            .blob
            .as_ref()
            .map(|blob| Self::encode_entry(BLOB_KEY, blob))
            .transpose()?;
        let now = chrono::Utc::now().timestamp();

        let conn = self.db.connection();
        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO vault_entries (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![VERIFIER_KEY, verifier_json, now],
        )?;
        match blob_json {
            Some(json) => {
                tx.execute(
                    "INSERT OR REPLACE INTO vault_entries (key, value, updated_at) VALUES (?1, ?2, ?3)",
                    params![BLOB_KEY, json, now],
                )?;
            }
            None => {
                tx.execute("DELETE FROM vault_entries WHERE key = ?1", params![BLOB_KEY])?;
            }
        }
        tx.commit()?;
        self.db.purge_log()?;
        Ok(())
    }

    fn exists(&self) -> Result<bool, StoreError> {
        Ok(self.read_entry(VERIFIER_KEY)?.is_some())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.db.connection().execute(
            "DELETE FROM vault_entries WHERE key IN (?1, ?2)",
            params![VERIFIER_KEY, BLOB_KEY],
        )?;
        self.db.purge_log()?;
        Ok(())
    }
}
