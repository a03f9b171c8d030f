use crate::config::settings::AppConfig;
use crate::infrastructure::db::store::DynStore;
use crate::infrastructure::storage::DynStorage;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: DynStore,
    pub storage: DynStorage,
}

impl AppState {
    pub fn new(config: AppConfig, store: DynStore, storage: DynStorage) -> Self {
        Self {
            config,
            store,
            storage,
        }
    }
}
