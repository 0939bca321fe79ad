//! Game result types returned by the indexing backend.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::GameError;

/// A game from the backend's own index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IndexedGame {
    /// Stable unique identifier.
    pub id: String,
    pub title: String,
    /// Source label (repack group, site name).
    pub source: String,
    pub webpage_url: String,
    /// Magnet URIs, in the order the backend returned them.
    #[serde(default)]
    pub uris: Vec<String>,
    /// Human-readable size, e.g. "35.2 GB".
    pub size: String,
    /// Upload timestamp as an ISO date string.
    pub upload_date: String,
}

impl IndexedGame {
    /// Upload date formatted for display ("Jan 5, 2024").
    ///
    /// Falls back to the raw string when it is neither a plain date nor RFC 3339.
    pub fn formatted_upload_date(&self) -> String {
        let raw = self.upload_date.trim();
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()));

        match date {
            Some(d) => d.format("%b %-d, %Y").to_string(),
            None => self.upload_date.clone(),
        }
    }

    /// Labelled magnet links, numbered from 1.
    pub fn magnet_links(&self) -> Vec<MagnetLink> {
        self.uris
            .iter()
            .enumerate()
            .map(|(i, uri)| MagnetLink {
                label: format!("Magnet Link {}", i + 1),
                uri: uri.clone(),
            })
            .collect()
    }
}

/// A game found through web search. Has no stable identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebGame {
    pub title: String,
    pub webpage_url: String,
    pub source: String,
    /// Free-text excerpt from the search engine.
    pub snippet: String,
}

/// A single search result, tagged with the endpoint it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameResult {
    Indexed(IndexedGame),
    Web(WebGame),
}

impl GameResult {
    pub fn kind(&self) -> GameKind {
        match self {
            GameResult::Indexed(_) => GameKind::Indexed,
            GameResult::Web(_) => GameKind::Web,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            GameResult::Indexed(g) => &g.title,
            GameResult::Web(g) => &g.title,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            GameResult::Indexed(g) => &g.source,
            GameResult::Web(g) => &g.source,
        }
    }

    pub fn webpage_url(&self) -> &str {
        match self {
            GameResult::Indexed(g) => &g.webpage_url,
            GameResult::Web(g) => &g.webpage_url,
        }
    }

    /// Key used to identify this result within a rendered list.
    ///
    /// Web results have no identifier, so two of them with the same title are
    /// told apart only by `position`.
    pub fn display_key(&self, position: usize) -> String {
        match self {
            GameResult::Indexed(g) => g.id.clone(),
            GameResult::Web(g) => format!("{}-{}", g.title, position),
        }
    }

    /// The page to open for "Visit Source Page".
    pub fn visit_url(&self) -> Result<&str, GameError> {
        let url = self.webpage_url().trim();
        if url.is_empty() {
            return Err(GameError::InvalidSourceUrl);
        }
        Ok(url)
    }

    pub fn badge(&self) -> SourceBadge {
        SourceBadge::for_source(self.source())
    }
}

impl From<IndexedGame> for GameResult {
    fn from(game: IndexedGame) -> Self {
        GameResult::Indexed(game)
    }
}

impl From<WebGame> for GameResult {
    fn from(game: WebGame) -> Self {
        GameResult::Web(game)
    }
}

/// Which of the two result shapes a value has.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Indexed,
    Web,
}

/// Badge style picked from the source label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceBadge {
    FitGirl,
    Dodi,
    Default,
}

impl SourceBadge {
    pub fn for_source(source: &str) -> Self {
        let lower = source.to_lowercase();
        if lower.contains("fitgirl") {
            SourceBadge::FitGirl
        } else if lower.contains("dodi") {
            SourceBadge::Dodi
        } else {
            SourceBadge::Default
        }
    }
}

/// A magnet URI with its button label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MagnetLink {
    pub label: String,
    pub uri: String,
}
