use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::games::GameResult;

/// Which backend a session searches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// The backend's own index.
    Index,
    /// Google-backed web search.
    Web,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Index => "index",
            SearchMode::Web => "web",
        }
    }

    /// Error shown when the backend answers but reports failure without a message.
    pub fn default_error(&self) -> &'static str {
        match self {
            SearchMode::Index => "Search failed",
            SearchMode::Web => "Google search failed",
        }
    }

    /// Error shown when the backend cannot be reached or answers garbage.
    pub fn connectivity_error(&self) -> &'static str {
        match self {
            SearchMode::Index => {
                "Failed to connect to server. Please check if the API is running."
            }
            SearchMode::Web => "Failed to connect to Google search. Please try again.",
        }
    }

    pub fn loading_text(&self) -> &'static str {
        match self {
            SearchMode::Index => "Searching database...",
            SearchMode::Web => "Searching Google...",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(SearchMode::Index),
            "web" => Ok(SearchMode::Web),
            other => Err(format!("Unknown search mode: {}", other)),
        }
    }
}

/// Observable state of one search surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub query: String,
    pub results: Vec<GameResult>,
    pub is_loading: bool,
    pub has_searched: bool,
    pub error: Option<String>,
}

impl SessionState {
    /// What the results list should show, in display precedence order.
    pub fn list_status(&self) -> ListStatus {
        if self.is_loading {
            ListStatus::Loading
        } else if let Some(error) = &self.error {
            ListStatus::Error {
                message: error.clone(),
            }
        } else if !self.has_searched {
            ListStatus::NotSearched
        } else if self.results.is_empty() {
            ListStatus::Empty
        } else {
            let count = self.results.len();
            let noun = if count == 1 { "game" } else { "games" };
            ListStatus::Results {
                count,
                label: format!("Found {} {}", count, noun),
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListStatus {
    Loading,
    Error { message: String },
    NotSearched,
    Empty,
    Results { count: usize, label: String },
}

/// How a single `run_search` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query was blank; nothing happened.
    Skipped,
    Succeeded { count: usize },
    /// The backend answered with a falsy success indicator.
    Rejected { message: String },
    /// The backend could not be reached or its answer was unreadable.
    Unreachable { message: String },
}

impl SearchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchOutcome::Skipped => "skipped",
            SearchOutcome::Succeeded { .. } => "succeeded",
            SearchOutcome::Rejected { .. } => "rejected",
            SearchOutcome::Unreachable { .. } => "unreachable",
        }
    }
}
