/// Application configuration
///
/// Settings come from three layers, each overriding the one before:
/// built-in defaults, an optional `settings.toml` in the user's config
/// directory, and `CAT_*` environment variables. The API key has no
/// default and must be supplied by one of the two outer layers.
///
/// ```toml
/// # ~/.config/cat-gallery/settings.toml
/// api_key = "live_..."
/// page_size = 20
/// ```
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::state::gallery::DEFAULT_PAGE_SIZE;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "cat-gallery";

pub const DEFAULT_API_BASE_URL: &str = "https://api.thecatapi.com/v1";

pub const ENV_API_KEY: &str = "CAT_API_KEY";
pub const ENV_API_BASE_URL: &str = "CAT_API_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "CAT_PAGE_SIZE";

/// Resolved configuration used by the running application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub page_size: u32,
}

/// Contents of `settings.toml`; every field is optional
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Location of `settings.toml` for this user, if a config dir exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Load the configuration from the default file and the process environment
pub fn load() -> Result<Config, AppError> {
    let path = default_config_path();
    resolve(path.as_deref(), |name| std::env::var(name).ok())
}

/// Read `settings.toml`, treating a missing file as empty settings
pub fn read_settings(path: &Path) -> Result<Settings, AppError> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge defaults, the settings file at `path` and the variables returned by `env`
pub fn resolve<F>(path: Option<&Path>, env: F) -> Result<Config, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let settings = match path {
        Some(path) => {
            let settings = read_settings(path)?;
            if settings != Settings::default() {
                log::info!("⚙️  Loaded settings from {}", path.display());
            }
            settings
        }
        None => Settings::default(),
    };

    let lookup = |name: &str| env(name).filter(|value| !value.trim().is_empty());

    let api_key = lookup(ENV_API_KEY)
        .or(settings.api_key)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            let hint = path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| CONFIG_FILE.to_string());
            AppError::MissingApiKey(hint)
        })?;

    let api_base_url = lookup(ENV_API_BASE_URL)
        .or(settings.api_base_url)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let page_size = match lookup(ENV_PAGE_SIZE) {
        Some(value) => parse_page_size(&value)?,
        None => settings.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    Ok(Config {
        api_key,
        api_base_url,
        page_size,
    })
}

fn parse_page_size(value: &str) -> Result<u32, AppError> {
    match value.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(AppError::InvalidEnv {
            name: ENV_PAGE_SIZE.to_string(),
            value: value.to_string(),
        }),
    }
}
