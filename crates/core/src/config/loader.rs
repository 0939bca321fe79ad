use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix shared by every environment override.
const ENV_PREFIX: &str = "GAMESEARCH_";

/// Load configuration from a TOML file, then apply environment overrides.
///
/// An override names the section and the key separated by a double
/// underscore, so `GAMESEARCH_BACKEND__TIMEOUT_SECS=10` sets
/// `backend.timeout_secs`. `GAMESEARCH_CONFIG` only selects the file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    layered(path)
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Defaults, then the file, then the environment.
fn layered(path: &Path) -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
