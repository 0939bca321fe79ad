//! Mock magnet opener for testing.

use std::sync::{Mutex, PoisonError};

use tokio::sync::oneshot;

use crate::magnet::{HandoffSignal, MagnetOpener};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    /// Never signals; the probe window runs out.
    Silent,
    /// Signals a handoff immediately.
    HandsOff,
    /// Opening itself fails.
    Fails,
}

/// Mock implementation of the MagnetOpener trait.
///
/// Records every URI it is asked to open.
#[derive(Debug)]
pub struct MockMagnetOpener {
    behavior: Behavior,
    opened: Mutex<Vec<String>>,
    /// Senders for silent opens, kept alive so the signal never resolves.
    pending: Mutex<Vec<oneshot::Sender<()>>>,
}

impl MockMagnetOpener {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            opened: Mutex::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// An opener on a machine without a torrent client.
    pub fn silent() -> Self {
        Self::with_behavior(Behavior::Silent)
    }

    /// An opener whose torrent client always takes the link.
    pub fn hands_off() -> Self {
        Self::with_behavior(Behavior::HandsOff)
    }

    /// An opener that cannot launch anything.
    pub fn failing() -> Self {
        Self::with_behavior(Behavior::Fails)
    }

    /// URIs opened so far.
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl MagnetOpener for MockMagnetOpener {
    fn open(&self, uri: &str) -> std::io::Result<HandoffSignal> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(uri.to_string());

        let (tx, rx) = oneshot::channel();
        match self.behavior {
            Behavior::Silent => self
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(tx),
            Behavior::HandsOff => {
                let _ = tx.send(());
            }
            Behavior::Fails => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "mock opener not found",
                ))
            }
        }
        Ok(rx)
    }
}
