use std::sync::Arc;

use registry::Store;
use tokio::sync::Mutex;
use tracing::info;

use super::{config::Config, session::Sessions};

pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub sessions: Sessions,
    /// Held across every read-modify-write of the record files.
    pub write_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let store = Store::open(&config.data_dir);
        info!("Using data directory {}", store.dir().display());

        Arc::new(Self {
            sessions: Sessions::new(config.session_ttl),
            store,
            config,
            write_lock: Mutex::new(()),
        })
    }
}
