//! SecureVault persistence layer.
//!
//! Provides SQLite connection management, schema migrations and the
//! [`VaultStore`](vault_store::VaultStoreTrait) wrapper over the persisted
//! vault record.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use securevault::database::{Database, SqliteVaultStore, VaultStoreTrait};
//!
//! let db = Arc::new(Database::open("vault.db").expect("failed to open database"));
//! let store = SqliteVaultStore::new(db);
//! let initialized = store.exists().expect("failed to query store");
//! ```

pub mod connection;
pub mod migrations;
pub mod vault_store;

pub use connection::Database;
pub use vault_store::{SqliteVaultStore, VaultStoreTrait};
