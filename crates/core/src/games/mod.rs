//! Game result model.
//!
//! Results from the index endpoint and the web search endpoint have different
//! shapes. Typed decoding tags them by endpoint (see [`crate::api`]); the
//! structural [`classify`] is kept for raw JSON that did not come through
//! that path.

mod types;

pub use types::*;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid source URL")]
    InvalidSourceUrl,
}

/// Classify a raw result object by the fields it carries.
///
/// A value is [`GameKind::Indexed`] iff it has `id`, `size` and `uploadDate`.
/// Everything else is treated as [`GameKind::Web`], including an indexed
/// payload that lost one of those fields.
pub fn classify(value: &Value) -> GameKind {
    let has = |field: &str| value.get(field).is_some();
    if has("id") && has("size") && has("uploadDate") {
        GameKind::Indexed
    } else {
        GameKind::Web
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn indexed(id: &str, title: &str) -> IndexedGame {
        IndexedGame {
            id: id.to_string(),
            title: title.to_string(),
            source: "FitGirl Repacks".to_string(),
            webpage_url: "https://example.com/game".to_string(),
            uris: vec![
                "magnet:?xt=urn:btih:aaaa".to_string(),
                "magnet:?xt=urn:btih:bbbb".to_string(),
            ],
            size: "2 GB".to_string(),
            upload_date: "2024-01-01".to_string(),
        }
    }

    fn web(title: &str) -> WebGame {
        WebGame {
            title: title.to_string(),
            webpage_url: "https://example.com/web".to_string(),
            source: "example.com".to_string(),
            snippet: "A game".to_string(),
        }
    }

    #[test]
    fn test_classify_indexed() {
        let value = json!({
            "id": "1",
            "size": "2GB",
            "uploadDate": "2024-01-01",
            "title": "X",
            "source": "Y",
            "webpageUrl": "z",
            "uris": []
        });
        assert_eq!(classify(&value), GameKind::Indexed);
    }

    #[test]
    fn test_classify_web() {
        let value = json!({
            "title": "X",
            "source": "Y",
            "webpageUrl": "z",
            "snippet": "..."
        });
        assert_eq!(classify(&value), GameKind::Web);
    }

    #[test]
    fn test_classify_indexed_missing_field_falls_through_to_web() {
        let value = json!({ "id": "1", "size": "2GB", "title": "X" });
        assert_eq!(classify(&value), GameKind::Web);
    }

    #[test]
    fn test_deserialize_indexed_wire_format() {
        let value = json!({
            "id": "abc",
            "title": "Hollow Knight",
            "source": "DODI",
            "webpageUrl": "https://example.com/hk",
            "uris": ["magnet:?xt=urn:btih:1234"],
            "size": "1.2 GB",
            "uploadDate": "2023-11-20"
        });
        let game: IndexedGame = serde_json::from_value(value).unwrap();
        assert_eq!(game.id, "abc");
        assert_eq!(game.webpage_url, "https://example.com/hk");
        assert_eq!(game.upload_date, "2023-11-20");
        assert_eq!(game.uris.len(), 1);
    }

    #[test]
    fn test_deserialize_indexed_without_uris() {
        let value = json!({
            "id": "abc",
            "title": "T",
            "source": "S",
            "webpageUrl": "u",
            "size": "1 GB",
            "uploadDate": "2023-11-20"
        });
        let game: IndexedGame = serde_json::from_value(value).unwrap();
        assert!(game.uris.is_empty());
    }

    #[test]
    fn test_display_key() {
        let a = GameResult::from(indexed("id-7", "Celeste"));
        assert_eq!(a.display_key(3), "id-7");

        let b = GameResult::from(web("Celeste"));
        assert_eq!(b.display_key(0), "Celeste-0");
        assert_eq!(b.display_key(1), "Celeste-1");
    }

    #[test]
    fn test_visit_url_rejects_empty() {
        let mut game = web("Celeste");
        game.webpage_url = "  ".to_string();
        let result = GameResult::from(game);
        assert_eq!(result.visit_url(), Err(GameError::InvalidSourceUrl));

        let ok = GameResult::from(web("Celeste"));
        assert_eq!(ok.visit_url(), Ok("https://example.com/web"));
    }

    #[test]
    fn test_formatted_upload_date() {
        let mut game = indexed("1", "T");
        assert_eq!(game.formatted_upload_date(), "Jan 1, 2024");

        game.upload_date = "2023-11-20T10:15:00Z".to_string();
        assert_eq!(game.formatted_upload_date(), "Nov 20, 2023");

        game.upload_date = "sometime".to_string();
        assert_eq!(game.formatted_upload_date(), "sometime");
    }

    #[test]
    fn test_magnet_links_are_numbered_from_one() {
        let links = indexed("1", "T").magnet_links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label, "Magnet Link 1");
        assert_eq!(links[1].label, "Magnet Link 2");
        assert_eq!(links[1].uri, "magnet:?xt=urn:btih:bbbb");
    }

    #[test]
    fn test_source_badge() {
        assert_eq!(SourceBadge::for_source("FitGirl Repacks"), SourceBadge::FitGirl);
        assert_eq!(SourceBadge::for_source("DODI-Repacks"), SourceBadge::Dodi);
        assert_eq!(SourceBadge::for_source("elamigos"), SourceBadge::Default);
    }

    #[test]
    fn test_game_result_serializes_with_kind_tag() {
        let value = serde_json::to_value(GameResult::from(web("Celeste"))).unwrap();
        assert_eq!(value["kind"], "web");
        assert_eq!(value["snippet"], "A game");
        assert_eq!(value["webpageUrl"], "https://example.com/web");
    }
}
