//! SecureVault: a password-protected local secret vault.
//!
//! Secrets are kept in memory only while the vault is unlocked and persisted
//! as one AES-256-GCM blob keyed by PBKDF2 from the vault password. Password
//! checks go through a separate salted SHA-256 verifier.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
