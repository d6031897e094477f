// SecureVault Settings Engine
// Loads, saves and resets the vault settings.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::VaultSettings;

/// File name of the vault database inside the data directory.
pub const DEFAULT_DATABASE_FILE: &str = "vault.db";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<VaultSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &VaultSettings;
    fn set_settings(&mut self, settings: VaultSettings) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: VaultSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: VaultSettings::default(),
        }
    }

    /// Creates a SettingsEngine holding `settings` without touching disk.
    pub fn with_settings(path_override: Option<String>, settings: VaultSettings) -> Self {
        let mut engine = Self::new(path_override);
        engine.settings = settings;
        engine
    }

    /// Resolves the vault database path: the configured one, or
    /// `vault.db` in the platform data directory.
    pub fn database_path(&self) -> PathBuf {
        match &self.settings.storage.database_path {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => platform::get_data_dir().join(DEFAULT_DATABASE_FILE),
        }
    }

    fn validate(settings: &VaultSettings) -> Result<(), SettingsError> {
        if settings.security.kdf_iterations == 0 {
            return Err(SettingsError::InvalidValue(
                "security.kdf_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<VaultSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = VaultSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: VaultSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Self::validate(&settings)?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &VaultSettings {
        &self.settings
    }

    /// Validates and replaces the settings, then saves them to disk.
    ///
    /// On error the current settings are left untouched.
    fn set_settings(&mut self, settings: VaultSettings) -> Result<(), SettingsError> {
        Self::validate(&settings)?;
        let previous = std::mem::replace(&mut self.settings, settings);
        if let Err(e) = self.save() {
            self.settings = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = VaultSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
