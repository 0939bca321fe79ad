use std::sync::Arc;
use std::time::Duration;

use gamesearch_core::{
    Config, GameApi, MagnetOpener, MagnetProbe, NotificationCenter, SearchMode, SearchSession,
    SyncOrchestrator,
};

/// Shared application state
pub struct AppState {
    config: Config,
    index_session: Arc<SearchSession>,
    web_session: Arc<SearchSession>,
    sync: Arc<SyncOrchestrator>,
    notifications: Arc<NotificationCenter>,
    magnet: MagnetProbe,
}

impl AppState {
    /// Wire the sessions, sync orchestrator and magnet probe around one backend.
    pub fn new(config: Config, api: Arc<dyn GameApi>, opener: Arc<dyn MagnetOpener>) -> Self {
        let index_session = Arc::new(SearchSession::new(SearchMode::Index, Arc::clone(&api)));
        let web_session = Arc::new(SearchSession::new(SearchMode::Web, Arc::clone(&api)));
        let notifications = Arc::new(NotificationCenter::new(config.notifications.capacity));
        let sync = Arc::new(SyncOrchestrator::new(
            api,
            Arc::clone(&index_session),
            Arc::clone(&notifications),
        ));
        let magnet = MagnetProbe::new(
            opener,
            Duration::from_millis(config.magnet.probe_window_ms),
        );

        Self {
            config,
            index_session,
            web_session,
            sync,
            notifications,
            magnet,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self, mode: SearchMode) -> &Arc<SearchSession> {
        match mode {
            SearchMode::Index => &self.index_session,
            SearchMode::Web => &self.web_session,
        }
    }

    pub fn sync(&self) -> &SyncOrchestrator {
        self.sync.as_ref()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        self.notifications.as_ref()
    }

    pub fn magnet(&self) -> &MagnetProbe {
        &self.magnet
    }
}
