//! RPC method handler for the SecureVault JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` maps each method onto one [`VaultSession`] operation;
//! the UI shell on the other side holds no vault logic of its own.
//! The `settings.*` methods edit the settings file; changes apply the next
//! time the vault is opened.
//!
//! [`VaultSession`]: crate::services::vault_session::VaultSession

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::errors::VaultError;
use crate::types::secret::Secret;
use crate::types::settings::VaultSettings;

fn vault_error(e: VaultError) -> String {
    format!("{}: {}", e.kind(), e)
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

fn secret_json(s: &Secret) -> Value {
    json!({
        "id": s.id,
        "title": s.title,
        "content": s.content,
        "created": s.created_at.to_rfc3339(),
    })
}

/// Dispatch a JSON-RPC method call to the vault session.
///
/// Returns `Ok(Value)` on success or `Err(String)` shaped as `"<Kind>: <message>"`
/// for vault errors.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        "vault.status" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({
                "state": a.vault.state(),
                "min_password_length": a.vault.policy().min_password_length,
            }))
        }
        "vault.setup" => {
            let password = str_param(params, "password")?;
            let confirm = str_param(params, "confirm")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.vault.setup(password, confirm).map_err(vault_error)?;
            Ok(json!({"ok": true}))
        }
        "vault.login" => {
            let password = str_param(params, "password")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.vault.login(password).map_err(vault_error)?;
            let count = a.vault.secret_count().map_err(vault_error)?;
            Ok(json!({"ok": true, "count": count}))
        }
        "vault.logout" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.vault.logout();
            Ok(json!({"ok": true}))
        }
        "vault.add_secret" => {
            let title = str_param(params, "title")?;
            let content = str_param(params, "content")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let secret = a.vault.add_secret(title, content).map_err(vault_error)?;
            Ok(secret_json(secret))
        }
        "vault.search" => {
            let query = params.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let a = app.lock().map_err(|e| e.to_string())?;
            let found = a.vault.search(query).map_err(vault_error)?;
            let arr: Vec<Value> = found.into_iter().map(secret_json).collect();
            Ok(json!(arr))
        }
        "vault.wipe" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.vault.wipe().map_err(vault_error)?;
            Ok(json!({"ok": true}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let settings =
                serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())?;
            Ok(json!({
                "settings": settings,
                "config_path": a.settings_engine.get_config_path(),
            }))
        }
        "settings.set" => {
            let raw = params.get("settings").cloned().ok_or("missing settings")?;
            let settings: VaultSettings =
                serde_json::from_value(raw).map_err(|e| format!("invalid settings: {}", e))?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine
                .set_settings(settings)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.settings_engine.reset().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
