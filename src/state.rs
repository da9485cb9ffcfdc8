use crate::catalog::Catalog;
use crate::loops::LoopController;
use crate::remote::RemoteSync;
use crate::stats::LocalStatsStore;
use crate::storage::KeyValueStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub stats: Arc<LocalStatsStore>,
    pub loops: Arc<LoopController>,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, remote: Option<RemoteSync>) -> Self {
        let catalog = Arc::new(Catalog::builtin());
        let stats = Arc::new(LocalStatsStore::new(store, remote));
        let loops = Arc::new(LoopController::new(Arc::clone(&catalog), Arc::clone(&stats)));
        Self {
            catalog,
            stats,
            loops,
        }
    }
}
