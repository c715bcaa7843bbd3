//! Query parameter synchronizer
//!
//! Mirrors a list of open identifiers in a repeatable query key:
//! - `get_ids` waits for the key to appear on the live route stream
//! - `add_id` appends an identifier unless it is already present
//! - `delete_id` removes every occurrence of an identifier
//!
//! Both mutations leave the tracked key free of repeated values. Every call
//! re-reads the route state, so the synchronizer holds nothing of its own
//! beyond its configuration.

use std::sync::Arc;
use std::time::Duration;

use idsync_query::{parse_url, QueryParams};
use idsync_route::RouteStateProvider;
use url::Url;

use crate::error::SyncError;

pub const DEFAULT_PARAM_KEY: &str = "id";

pub(crate) const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

pub(crate) const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS);

type SyncResult<T> = std::result::Result<T, SyncError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Query key carrying the identifiers
    pub key: String,
    /// Upper bound for `get_ids`; `None` waits until the key shows up
    pub wait_timeout: Option<Duration>,
    /// Issue a navigation even when `delete_id` changes nothing
    pub navigate_on_noop: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_PARAM_KEY.to_string(),
            wait_timeout: Some(DEFAULT_WAIT_TIMEOUT),
            navigate_on_noop: false,
        }
    }
}

pub struct QueryParamSync<R: RouteStateProvider> {
    route: Arc<R>,
    config: SyncConfig,
}

impl<R: RouteStateProvider> QueryParamSync<R> {
    pub fn new(route: Arc<R>) -> Self {
        Self::with_config(route, SyncConfig::default())
    }

    pub fn with_config(route: Arc<R>, config: SyncConfig) -> Self {
        Self { route, config }
    }

    pub fn tracked_key(&self) -> &str {
        &self.config.key
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn route(&self) -> &Arc<R> {
        &self.route
    }

    /// Identifiers in the current snapshot, without waiting
    pub fn ids(&self) -> Vec<String> {
        owned(&self.route.query_snapshot(), &self.config.key)
    }

    pub fn contains_id(&self, identifier: &str) -> bool {
        self.route
            .query_snapshot()
            .contains_value(&self.config.key, identifier)
    }

    /// Wait for the first route state carrying the tracked key and return
    /// its values. Bounded by the configured wait timeout, if any.
    pub async fn get_ids(&self) -> SyncResult<Vec<String>> {
        match self.config.wait_timeout {
            Some(timeout) => self.get_ids_within(timeout).await,
            None => self.wait_for_ids().await,
        }
    }

    /// Same as `get_ids` with an explicit timeout
    pub async fn get_ids_within(&self, timeout: Duration) -> SyncResult<Vec<String>> {
        tokio::time::timeout(timeout, self.wait_for_ids())
            .await
            .map_err(|_| SyncError::Timeout(timeout))?
    }

    async fn wait_for_ids(&self) -> SyncResult<Vec<String>> {
        let key = self.config.key.as_str();
        let mut rx = self.route.subscribe();

        loop {
            {
                let params = rx.borrow_and_update();
                if params.contains_key(key) {
                    return Ok(owned(&params, key));
                }
            }

            if rx.changed().await.is_err() {
                tracing::debug!(key = %key, "Route stream closed while waiting for ids");
                return Err(SyncError::RouteClosed);
            }
        }
    }

    /// Append `identifier` to the tracked key and navigate. Repeated
    /// identifiers already in the URL are collapsed to their first
    /// occurrence. Returns whether a navigation was issued; an identifier
    /// already present and no repeats to collapse means no navigation.
    pub fn add_id(&self, identifier: &str) -> SyncResult<bool> {
        if identifier.is_empty() {
            return Err(SyncError::EmptyIdentifier);
        }

        let key = self.config.key.as_str();
        let (url, mut params) = self.current_route()?;
        let collapsed = params.dedup_values(key);

        if params.contains_value(key, identifier) {
            if collapsed == 0 {
                tracing::debug!(id = %identifier, "Identifier already present");
                return Ok(false);
            }
        } else {
            params.append(key, identifier);
        }

        let url = self.navigate_with(url, &params)?;

        tracing::info!(id = %identifier, collapsed, url = %url, "Added identifier");

        Ok(true)
    }

    /// Remove every occurrence of `identifier`, collapse any other repeated
    /// identifiers, and navigate. Returns whether a navigation was issued.
    pub fn delete_id(&self, identifier: &str) -> SyncResult<bool> {
        let key = self.config.key.as_str();
        let (url, mut params) = self.current_route()?;

        if !params.contains_key(key) {
            tracing::debug!(id = %identifier, "No identifiers to delete from");
            return Ok(false);
        }

        let removed = params.remove_value(key, identifier);
        let collapsed = params.dedup_values(key);
        if removed == 0 && collapsed == 0 && !self.config.navigate_on_noop {
            tracing::debug!(id = %identifier, "Identifier not present");
            return Ok(false);
        }

        let url = self.navigate_with(url, &params)?;

        tracing::info!(id = %identifier, removed, collapsed, url = %url, "Deleted identifier");

        Ok(true)
    }

    /// Current URL and its query, taken from a single read
    fn current_route(&self) -> SyncResult<(Url, QueryParams)> {
        let url = parse_url(&self.route.current_url())?;
        let params = QueryParams::from_url(&url);
        Ok((url, params))
    }

    fn navigate_with(&self, mut url: Url, params: &QueryParams) -> SyncResult<String> {
        params.apply_to(&mut url);
        let url = url.to_string();
        self.route.navigate(&url)?;
        Ok(url)
    }
}

impl<R: RouteStateProvider> Clone for QueryParamSync<R> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
            config: self.config.clone(),
        }
    }
}

fn owned(params: &QueryParams, key: &str) -> Vec<String> {
    params
        .get_all(key)
        .into_iter()
        .map(str::to_string)
        .collect()
}
