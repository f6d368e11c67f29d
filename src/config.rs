use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

use crate::api::{DEFAULT_BASE_URL, normalize_base_url};

pub const APP_ID: &str = "campus.teamup.app";
pub const CONFIG_VERSION: u64 = 1;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct TeamUpConfig {
    /// Root of the REST API, e.g. `https://campus.example/api/v1/`.
    pub api_base_url: String,
    pub debug_logging: bool,
    /// Prefills the login form.
    pub last_email: String,
}

impl Default for TeamUpConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            debug_logging: false,
            last_email: String::new(),
        }
    }
}

impl TeamUpConfig {
    pub fn base_url(&self) -> String {
        normalize_base_url(&self.api_base_url)
    }

    /// Load the stored entry, falling back to defaults for anything unreadable.
    pub fn load() -> Result<(Self, cosmic_config::Config), cosmic_config::Error> {
        let handle = cosmic_config::Config::new(APP_ID, CONFIG_VERSION)?;
        let config = Self::get_entry(&handle).unwrap_or_else(|(errs, cfg)| {
            for e in errs {
                log::warn!("config: {:?}", e);
            }
            cfg
        });
        Ok((config, handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_api() {
        let config = TeamUpConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert!(!config.debug_logging);
    }

    #[test]
    fn base_url_is_normalized() {
        let config = TeamUpConfig {
            api_base_url: "https://campus.example/api/v1".into(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "https://campus.example/api/v1/");
    }
}
