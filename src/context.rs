//! The application context handed to every operation.

use crate::assets::AssetResolver;
use crate::config::Config;
use crate::mood::MoodCatalog;
use crate::store::MoodStore;

/// Configuration plus the components built from it.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub catalog: MoodCatalog,
    pub store: MoodStore,
    pub assets: AssetResolver,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        AppContext {
            catalog: MoodCatalog::builtin(),
            store: MoodStore::new(config.mood_file()),
            assets: AssetResolver::new(config.assets_dir.clone()),
            config,
        }
    }
}
