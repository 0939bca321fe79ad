pub mod api;
pub mod config;
pub mod games;
pub mod magnet;
pub mod metrics;
pub mod notify;
pub mod session;
pub mod sync;
pub mod testing;

pub use api::{ApiError, GameApi, HttpGameApi, ServiceResponse, SyncResponse};
pub use config::{
    load_config, load_config_from_str, validate_config, BackendConfig, Config, ConfigError,
    FrontendConfig, MagnetConfig, NotificationConfig, ServerConfig,
};
pub use games::{
    classify, GameError, GameKind, GameResult, IndexedGame, MagnetLink, SourceBadge, WebGame,
};
pub use magnet::{
    is_magnet_uri, magnet_info_hash, ClientLink, CommandOpener, FallbackPanel, LaunchOutcome,
    MagnetError, MagnetOpener, MagnetProbe,
};
pub use notify::{Notification, NotificationCenter, NotificationLevel};
pub use session::{ListStatus, SearchMode, SearchOutcome, SearchSession, SessionState};
pub use sync::{SyncOrchestrator, SyncOutcome};
