use crate::error::{OrgReposError, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const TOKEN_ENV: &str = "GITHUB_ACCESS_TOKEN";
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct AuthConfig {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

/// Bearer token. Its `Debug` output is redacted so it can't leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// The environment value wins over the config file; blank values count as unset.
pub fn resolve_credential(env_token: Option<String>, config: &Config) -> Option<Credential> {
    env_token
        .and_then(Credential::new)
        .or_else(|| config.auth.token.clone().and_then(Credential::new))
}

pub fn config_path() -> Result<PathBuf> {
    config_path_in(std::env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
}

/// `$XDG_CONFIG_HOME/orgrepos/config.toml`, else `~/.config/orgrepos/config.toml`.
fn config_path_in(xdg_config_home: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf> {
    let base = match xdg_config_home.filter(|xdg| !xdg.is_empty()) {
        Some(xdg) => PathBuf::from(xdg),
        None => home
            .map(|home| home.join(".config"))
            .ok_or_else(|| OrgReposError::Config("Cannot find home directory".into()))?,
    };
    Ok(base.join("orgrepos").join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}
