use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Backend URL is an http(s) origin and the timeout is non-zero
/// - Notification capacity and magnet probe window are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let url = config.backend.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "backend.url must start with http:// or https://, got '{}'",
            config.backend.url
        )));
    }

    if config.backend.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "backend.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.notifications.capacity == 0 {
        return Err(ConfigError::ValidationError(
            "notifications.capacity cannot be 0".to_string(),
        ));
    }

    if config.magnet.probe_window_ms == 0 {
        return Err(ConfigError::ValidationError(
            "magnet.probe_window_ms cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackendConfig, ServerConfig};

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                port: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_backend_url_without_scheme_fails() {
        let config = Config {
            backend: BackendConfig {
                url: "localhost:8080".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("backend.url"));
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let config = Config {
            backend: BackendConfig {
                timeout_secs: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_probe_window_fails() {
        let mut config = Config::default();
        config.magnet.probe_window_ms = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_notification_capacity_fails() {
        let mut config = Config::default();
        config.notifications.capacity = 0;
        assert!(validate_config(&config).is_err());
    }
}
