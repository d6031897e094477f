// SecureVault services
// Crypto primitives, password verification, settings and the vault session.

pub mod crypto_service;
pub mod password_verifier;
pub mod settings_engine;
pub mod vault_session;
