//! Process configuration: TOML file plus environment overrides.
//!
//! Built once at startup and passed by reference into the client and the
//! pipeline; nothing reads configuration ambiently after that.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use podium_types::ReportSettings;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::error::PodiumError;

/// Habitica API credentials and endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub user_id: String,
    pub api_token: String,
    /// `x-client` identifier; derived from the user id when left empty.
    pub client_id: String,
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            api_token: String::new(),
            client_id: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiSettings {
    /// Value for the `x-client` header, following the API's
    /// `<author-id>-<appname>` convention when no explicit id is set.
    pub fn client_header(&self) -> String {
        if self.client_id.is_empty() {
            format!("{}-podium", self.user_id)
        } else {
            self.client_id.clone()
        }
    }
}

/// Full process configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PodiumConfig {
    pub api: ApiSettings,
    pub report: ReportSettings,
}

/// Default config path: `<config_dir>/podium/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("podium").join("config.toml"))
}

/// Load configuration once at startup.
///
/// A missing file is not an error — credentials may come entirely from the
/// environment. Environment variables override file values and use the
/// names the original deployment did: `HABITICA_USER_ID`,
/// `HABITICA_API_TOKEN`, `HABITICA_CLIENT`.
pub fn load(path: Option<&Path>) -> Result<PodiumConfig, PodiumError> {
    let path = path.map(Path::to_path_buf).or_else(default_config_path);

    let mut config = match &path {
        Some(p) if p.exists() => parse_file(p)?,
        _ => PodiumConfig::default(),
    };

    apply_env_overrides(&mut config);

    if config.api.user_id.is_empty() || config.api.api_token.is_empty() {
        return Err(PodiumError::MissingCredentials);
    }
    Ok(config)
}

fn parse_file(path: &Path) -> Result<PodiumConfig, PodiumError> {
    let contents = fs::read_to_string(path).map_err(|e| PodiumError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&contents).map_err(|e| PodiumError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn apply_env_overrides(config: &mut PodiumConfig) {
    if let Ok(value) = env::var("HABITICA_USER_ID")
        && !value.is_empty()
    {
        config.api.user_id = value;
    }
    if let Ok(value) = env::var("HABITICA_API_TOKEN")
        && !value.is_empty()
    {
        config.api.api_token = value;
    }
    if let Ok(value) = env::var("HABITICA_CLIENT")
        && !value.is_empty()
    {
        config.api.client_id = value;
    }
}
