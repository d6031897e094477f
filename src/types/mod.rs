// SecureVault shared type definitions
// Each submodule defines types used across the crate.

pub mod errors;
pub mod secret;
pub mod settings;
pub mod vault_record;
