//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external seams (the game
//! backend and the desktop magnet handler), allowing sessions, sync and the
//! HTTP surface to be tested without real infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use gamesearch_core::testing::{fixtures, MockGameApi, MockReply};
//!
//! let api = MockGameApi::new();
//! api.push_web(MockReply::ok(vec![fixtures::web_game("Celeste")])).await;
//! api.push_sync(MockReply::transport_failure()).await;
//! ```

mod mock_game_api;
mod mock_magnet_opener;

pub use mock_game_api::{Endpoint, MockGameApi, MockReply, RecordedCall};
pub use mock_magnet_opener::MockMagnetOpener;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::games::{IndexedGame, WebGame};

    /// Create an indexed game with reasonable defaults.
    pub fn indexed_game(id: &str, title: &str) -> IndexedGame {
        IndexedGame {
            id: id.to_string(),
            title: title.to_string(),
            source: "FitGirl Repacks".to_string(),
            webpage_url: format!("https://example.com/games/{}", id),
            uris: vec![format!(
                "magnet:?xt=urn:btih:{:0>40}&dn={}",
                id,
                title.replace(' ', "+")
            )],
            size: "4.2 GB".to_string(),
            upload_date: "2024-01-01".to_string(),
        }
    }

    /// Create a web search result.
    pub fn web_game(title: &str) -> WebGame {
        WebGame {
            title: title.to_string(),
            webpage_url: format!(
                "https://example.com/search/{}",
                title.to_lowercase().replace(' ', "-")
            ),
            source: "example.com".to_string(),
            snippet: format!("{} is a game.", title),
        }
    }
}
