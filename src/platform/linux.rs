// SecureVault platform paths for Linux
// Config: ~/.config/securevault
// Data:   ~/.local/share/securevault

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/securevault` if set, otherwise `~/.config/securevault`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("securevault"),
        _ => home_dir().join(".config").join("securevault"),
    }
}

/// Uses `$XDG_DATA_HOME/securevault` if set, otherwise `~/.local/share/securevault`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("securevault"),
        _ => home_dir().join(".local").join("share").join("securevault"),
    }
}
