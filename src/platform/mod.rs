// SecureVault platform abstraction
// Provides platform-specific paths for Windows, macOS, and Linux.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Environment variable that overrides the data directory on every platform.
pub const DATA_DIR_ENV: &str = "SECUREVAULT_DATA_DIR";

/// Returns the platform-specific configuration directory for SecureVault.
///
/// - **Linux**: `~/.config/securevault` (or `$XDG_CONFIG_HOME/securevault`)
/// - **macOS**: `~/Library/Application Support/SecureVault`
/// - **Windows**: `%APPDATA%/SecureVault`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the directory holding the vault database.
///
/// `$SECUREVAULT_DATA_DIR` wins if set; otherwise:
/// - **Linux**: `~/.local/share/securevault` (or `$XDG_DATA_HOME/securevault`)
/// - **macOS**: `~/Library/Application Support/SecureVault`
/// - **Windows**: `%APPDATA%/SecureVault`
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
