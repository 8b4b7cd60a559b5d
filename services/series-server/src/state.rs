use crate::config::{Config, RequestDefaults};
use ftv::{PayloadCache, ShapeLimits, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<PayloadCache>,
    pub defaults: RequestDefaults,
    pub limits: ShapeLimits,
    pub asset_root: Arc<PathBuf>, // Root the static pages and scripts are read from
}

impl AppState {
    pub fn new(
        cache: PayloadCache,
        defaults: RequestDefaults,
        limits: ShapeLimits,
        asset_root: PathBuf,
    ) -> Self {
        Self {
            cache: Arc::new(cache),
            defaults,
            limits,
            asset_root: Arc::new(asset_root),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let cache = match config.seed {
            Some(seed) => PayloadCache::seeded(seed, Arc::new(SystemClock)),
            None => PayloadCache::new(),
        };
        Self::new(
            cache,
            config.request_defaults(),
            config.shape_limits(),
            config.asset_root.clone(),
        )
    }
}
