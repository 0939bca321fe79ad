use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub magnet: MagnetConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([127, 0, 0, 1])
}

fn default_port() -> u16 {
    3000
}

/// Game indexing backend the front-end talks to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Backend origin (e.g., "http://localhost:8080")
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Notification feed configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// How many recent notifications are kept
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    50
}

/// Magnet link launch probe configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MagnetConfig {
    /// How long to wait for a torrent client to pick up the link
    #[serde(default = "default_probe_window_ms")]
    pub probe_window_ms: u64,
    /// Command used to hand a magnet URI to the desktop
    #[serde(default = "default_opener")]
    pub opener: String,
}

impl Default for MagnetConfig {
    fn default() -> Self {
        Self {
            probe_window_ms: default_probe_window_ms(),
            opener: default_opener(),
        }
    }
}

fn default_probe_window_ms() -> u64 {
    2000
}

fn default_opener() -> String {
    if cfg!(target_os = "macos") {
        "open".to_string()
    } else {
        "xdg-open".to_string()
    }
}

/// Static presentation bundle served next to the API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FrontendConfig {
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
        }
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("frontend/dist")
}
