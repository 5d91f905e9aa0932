//! Data source instance settings
//!
//! Every request carries the settings of the data source instance it was
//! issued against: a plain `jsonData` object and a map of decrypted secrets.

use dynamo_frames_aws::StaticCredentials;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Secret key holding the AWS access key id
pub const SECRET_ACCESS_KEY_ID: &str = "accessKeyId";
/// Secret key holding the AWS secret access key
pub const SECRET_SECRET_ACCESS_KEY: &str = "secretAccessKey";
/// Secret key holding the optional AWS session token
pub const SECRET_SESSION_TOKEN: &str = "sessionToken";

/// Settings as they arrive on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSettings {
    /// Non-secret settings object
    #[serde(default = "empty_object")]
    pub json_data: serde_json::Value,
    /// Decrypted secret settings
    #[serde(default)]
    pub decrypted_secure_json_data: HashMap<String, String>,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Context identifying the data source a request targets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginContext {
    /// Instance settings (absent for requests without a data source)
    #[serde(default)]
    pub data_source_instance_settings: Option<InstanceSettings>,
}

/// Errors loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `jsonData` did not match the expected shape
    #[error("could not unmarshal PluginSettings json: {0}")]
    Json(#[from] serde_json::Error),

    /// The request carried no data source settings
    #[error("data source instance settings are missing")]
    Missing,
}

/// Non-secret settings decoded from `jsonData`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonData {
    #[serde(default)]
    default_region: Option<String>,
}

/// Secret settings
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretSettings {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

impl fmt::Debug for SecretSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretSettings")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .finish()
    }
}

/// Loaded data source settings
#[derive(Debug, Clone, Default)]
pub struct PluginSettings {
    /// Region configured on the data source
    pub default_region: Option<String>,
    /// Credentials
    pub secrets: SecretSettings,
}

impl PluginSettings {
    /// Load settings from instance settings
    pub fn load(source: &InstanceSettings) -> Result<Self, SettingsError> {
        let json_data: JsonData = if source.json_data.is_null() {
            JsonData::default()
        } else {
            serde_json::from_value(source.json_data.clone())?
        };
        Ok(Self {
            default_region: json_data
                .default_region
                .filter(|r| !r.trim().is_empty()),
            secrets: load_secret_settings(&source.decrypted_secure_json_data),
        })
    }

    /// Load settings from a plugin context
    pub fn from_context(ctx: &PluginContext) -> Result<Self, SettingsError> {
        ctx.data_source_instance_settings
            .as_ref()
            .ok_or(SettingsError::Missing)
            .and_then(Self::load)
    }

    /// Static credentials, if an access key pair is configured
    pub fn credentials(&self) -> Option<StaticCredentials> {
        if self.secrets.access_key_id.is_empty() || self.secrets.secret_access_key.is_empty() {
            return None;
        }
        Some(StaticCredentials::new(
            self.secrets.access_key_id.clone(),
            self.secrets.secret_access_key.clone(),
            Some(self.secrets.session_token.clone()),
        ))
    }

    /// Resolve the region for a query: query, then settings, then fallback
    pub fn resolve_region<'a>(
        &'a self,
        query_region: Option<&'a str>,
        fallback: &'a str,
    ) -> &'a str {
        query_region
            .filter(|r| !r.trim().is_empty())
            .or(self.default_region.as_deref())
            .unwrap_or(fallback)
    }
}

fn load_secret_settings(source: &HashMap<String, String>) -> SecretSettings {
    let get = |key: &str| source.get(key).cloned().unwrap_or_default();
    SecretSettings {
        access_key_id: get(SECRET_ACCESS_KEY_ID),
        secret_access_key: get(SECRET_SECRET_ACCESS_KEY),
        session_token: get(SECRET_SESSION_TOKEN),
    }
}
