//! Application state
use idsync_core::{Config, QueryParamSync, Result, Router};
use std::sync::Arc;

/// Router seeded with the starting URL plus a synchronizer bound to it
pub struct AppState {
    sync: QueryParamSync<Router>,
}

impl AppState {
    pub fn new(config: &Config, url: &str) -> Result<Self> {
        config.validate()?;

        let router = Arc::new(Router::with_options(url, config.router_options())?);
        let sync = QueryParamSync::with_config(router, config.sync_config());

        Ok(Self { sync })
    }

    pub fn sync(&self) -> &QueryParamSync<Router> {
        &self.sync
    }
}
