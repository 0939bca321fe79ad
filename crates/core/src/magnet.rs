//! Magnet link launching.
//!
//! Handing a magnet URI to the desktop gives no reliable answer about whether a
//! torrent client picked it up. The probe opens the link and waits a short
//! window for a handoff signal; when none arrives it returns a fallback panel
//! telling the user how to get a client or copy the link by hand. This is
//! best effort only.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::metrics::MAGNET_PROBES;

static BTIH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)xt=urn:btih:([0-9a-f]{40}|[a-z2-7]{32})(?:&|$)").expect("valid BTIH regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MagnetError {
    #[error("Not a magnet link: {0}")]
    NotMagnet(String),
}

/// Fires when something on the desktop took the link.
pub type HandoffSignal = oneshot::Receiver<()>;

/// Hands magnet URIs to whatever handles them on this machine.
pub trait MagnetOpener: Send + Sync {
    fn open(&self, uri: &str) -> std::io::Result<HandoffSignal>;
}

/// Opens links with an external command (`xdg-open`, `open`, a client binary).
///
/// A successful exit counts as a handoff.
pub struct CommandOpener {
    program: String,
}

impl CommandOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MagnetOpener for CommandOpener {
    fn open(&self, uri: &str) -> std::io::Result<HandoffSignal> {
        let mut child = Command::new(&self.program)
            .arg(uri)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(false)
            .spawn()?;

        let (tx, rx) = oneshot::channel();
        let program = self.program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => {
                    let _ = tx.send(());
                }
                Ok(status) => debug!("{} exited with {}", program, status),
                Err(e) => debug!("Failed to wait for {}: {}", program, e),
            }
        });

        Ok(rx)
    }
}

/// A download link for a torrent client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientLink {
    pub name: String,
    pub url: String,
}

/// Instructions shown when no torrent client reacted to a magnet link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FallbackPanel {
    pub title: String,
    pub message: String,
    pub steps: Vec<String>,
    pub clients: Vec<ClientLink>,
    /// The link to copy by hand.
    pub magnet_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_hash: Option<String>,
}

impl FallbackPanel {
    pub fn for_uri(uri: &str) -> Self {
        Self {
            title: "Nothing happened?".to_string(),
            message: "It looks like you don't have a torrent client installed.".to_string(),
            steps: vec![
                "Download a client like qBittorrent or Transmission.".to_string(),
                "Install the software and restart your browser.".to_string(),
                "Or manually copy the magnet link.".to_string(),
            ],
            clients: vec![
                ClientLink {
                    name: "qBittorrent".to_string(),
                    url: "https://www.qbittorrent.org/download".to_string(),
                },
                ClientLink {
                    name: "Transmission".to_string(),
                    url: "https://www.transmissionbt.com/".to_string(),
                },
            ],
            magnet_uri: uri.to_string(),
            info_hash: magnet_info_hash(uri),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LaunchOutcome {
    HandedOff,
    NoClient { fallback: FallbackPanel },
}

pub fn is_magnet_uri(uri: &str) -> bool {
    uri.trim_start().to_ascii_lowercase().starts_with("magnet:?")
}

/// The BitTorrent info hash of a magnet link (hex or base32 form).
pub fn magnet_info_hash(uri: &str) -> Option<String> {
    BTIH.captures(uri)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Opens magnet links and watches for a handoff.
pub struct MagnetProbe {
    opener: Arc<dyn MagnetOpener>,
    window: Duration,
}

impl MagnetProbe {
    pub fn new(opener: Arc<dyn MagnetOpener>, window: Duration) -> Self {
        Self { opener, window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Open `uri` and wait up to the probe window for a client to take it.
    pub async fn launch(&self, uri: &str) -> Result<LaunchOutcome, MagnetError> {
        let uri = uri.trim();
        if !is_magnet_uri(uri) {
            return Err(MagnetError::NotMagnet(uri.to_string()));
        }

        let handed_off = match self.opener.open(uri) {
            Ok(signal) => matches!(tokio::time::timeout(self.window, signal).await, Ok(Ok(()))),
            Err(e) => {
                warn!("Failed to open magnet link: {}", e);
                false
            }
        };

        if handed_off {
            info!("Magnet link handed off to a torrent client");
            MAGNET_PROBES.with_label_values(&["handed_off"]).inc();
            Ok(LaunchOutcome::HandedOff)
        } else {
            info!("No torrent client reacted within {:?}", self.window);
            MAGNET_PROBES.with_label_values(&["no_client"]).inc();
            Ok(LaunchOutcome::NoClient {
                fallback: FallbackPanel::for_uri(uri),
            })
        }
    }
}
