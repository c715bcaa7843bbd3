//! In-process router
//!
//! Holds the current URL and a navigation history, and publishes the query
//! parameters of every new location on a watch channel.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;
use url::Url;

use idsync_query::QueryParams;

use crate::error::RouteError;
use crate::history::{NavigationEntry, NavigationHistory};
use crate::provider::RouteStateProvider;
use crate::Result;

const DEFAULT_MAX_HISTORY: usize = 100;

#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Maximum number of history entries kept
    pub max_history: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

struct RouteState {
    url: Url,
    history: NavigationHistory,
    navigations: u64,
}

pub struct Router {
    state: Arc<RwLock<RouteState>>,
    /// `None` once the router is closed
    query_tx: Arc<RwLock<Option<watch::Sender<QueryParams>>>>,
}

impl Router {
    pub fn new(initial_url: &str) -> Result<Self> {
        Self::with_options(initial_url, RouterOptions::default())
    }

    pub fn with_options(initial_url: &str, options: RouterOptions) -> Result<Self> {
        let url = Url::parse(initial_url)
            .map_err(|e| RouteError::InvalidUrl(format!("{}: {}", initial_url, e)))?;
        let (query_tx, _) = watch::channel(QueryParams::from_url(&url));
        let history = NavigationHistory::new(url.to_string(), options.max_history);

        Ok(Self {
            state: Arc::new(RwLock::new(RouteState {
                url,
                history,
                navigations: 0,
            })),
            query_tx: Arc::new(RwLock::new(Some(query_tx))),
        })
    }

    /// Number of navigation requests accepted so far
    pub fn navigation_count(&self) -> u64 {
        self.state.read().navigations
    }

    pub fn history(&self) -> Vec<NavigationEntry> {
        self.state.read().history.entries().to_vec()
    }

    pub fn can_go_back(&self) -> bool {
        self.state.read().history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.state.read().history.can_go_forward()
    }

    /// Move to the previous history entry, returning its URL
    pub fn back(&self) -> Result<String> {
        self.restore(
            |history| history.back().map(|e| e.url.clone()),
            RouteError::NothingToGoBack,
        )
    }

    /// Move to the next history entry, returning its URL
    pub fn forward(&self) -> Result<String> {
        self.restore(
            |history| history.forward().map(|e| e.url.clone()),
            RouteError::NothingToGoForward,
        )
    }

    /// Stop publishing. Pending subscribers observe a closed stream and
    /// further navigation fails.
    pub fn close(&self) {
        if self.query_tx.write().take().is_some() {
            tracing::debug!("Router closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.query_tx.read().is_none()
    }

    fn restore<F>(&self, step: F, exhausted: RouteError) -> Result<String>
    where
        F: FnOnce(&mut NavigationHistory) -> Option<String>,
    {
        let tx_guard = self.query_tx.read();
        let tx = tx_guard.as_ref().ok_or(RouteError::Closed)?;

        let mut state = self.state.write();
        let target = step(&mut state.history).ok_or(exhausted)?;
        let url =
            Url::parse(&target).map_err(|e| RouteError::InvalidUrl(format!("{}: {}", target, e)))?;

        tracing::debug!(url = %url, "Restored history entry");

        publish(tx, QueryParams::from_url(&url));
        state.url = url;

        Ok(target)
    }
}

impl RouteStateProvider for Router {
    fn current_url(&self) -> String {
        self.state.read().url.to_string()
    }

    fn query_snapshot(&self) -> QueryParams {
        QueryParams::from_url(&self.state.read().url)
    }

    fn subscribe(&self) -> watch::Receiver<QueryParams> {
        match self.query_tx.read().as_ref() {
            Some(tx) => tx.subscribe(),
            None => {
                // Sender dropped right away so the receiver reports closed
                let (_, rx) = watch::channel(self.query_snapshot());
                rx
            }
        }
    }

    fn navigate(&self, url: &str) -> Result<()> {
        let tx_guard = self.query_tx.read();
        let tx = tx_guard.as_ref().ok_or(RouteError::Closed)?;

        let mut state = self.state.write();
        let target = resolve(&state.url, url)?;

        state.history.push(target.to_string());
        state.navigations += 1;

        tracing::info!(url = %target, "Navigated");

        publish(tx, QueryParams::from_url(&target));
        state.url = target;

        Ok(())
    }
}

impl Clone for Router {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            query_tx: Arc::clone(&self.query_tx),
        }
    }
}

/// Accept absolute URLs, falling back to resolving against `base`
fn resolve(base: &Url, input: &str) -> Result<Url> {
    Url::parse(input)
        .or_else(|_| base.join(input))
        .map_err(|e| RouteError::InvalidUrl(format!("{}: {}", input, e)))
}

/// Wake subscribers only when the query map actually changed
fn publish(tx: &watch::Sender<QueryParams>, query: QueryParams) {
    tx.send_if_modified(|current| {
        if *current == query {
            false
        } else {
            *current = query;
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "https://app.test/transformations";

    #[test]
    fn test_invalid_initial_url() {
        assert!(matches!(
            Router::new("not a url"),
            Err(RouteError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_navigate_absolute_and_relative() {
        let router = Router::new(START).unwrap();

        router.navigate("https://app.test/transformations?id=a").unwrap();
        assert_eq!(router.query_snapshot().get_all("id"), vec!["a"]);

        router.navigate("?id=a&id=b").unwrap();
        assert_eq!(
            router.current_url(),
            "https://app.test/transformations?id=a&id=b"
        );
        assert_eq!(router.navigation_count(), 2);
    }

    #[test]
    fn test_subscribers_see_changes_only() {
        let router = Router::new(START).unwrap();
        let mut rx = router.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        router.navigate("?id=a").unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().get_all("id"), vec!["a"]);

        // Same query, different fragment
        router.navigate("?id=a#details").unwrap();
        assert!(!rx.has_changed().unwrap());
        assert_eq!(router.navigation_count(), 2);
    }

    #[tokio::test]
    async fn test_changed_wakes_pending_subscriber() {
        let router = Router::new(START).unwrap();
        let mut rx = router.subscribe();

        let navigator = router.clone();
        tokio::spawn(async move {
            navigator.navigate("?id=x").unwrap();
        });

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().get_all("id"), vec!["x"]);
    }

    #[test]
    fn test_back_and_forward_publish_queries() {
        let router = Router::new(START).unwrap();
        router.navigate("?id=a").unwrap();
        router.navigate("?id=a&id=b").unwrap();

        let url = router.back().unwrap();
        assert_eq!(url, "https://app.test/transformations?id=a");
        assert_eq!(router.query_snapshot().get_all("id"), vec!["a"]);
        assert!(router.can_go_forward());

        router.forward().unwrap();
        assert_eq!(router.query_snapshot().get_all("id"), vec!["a", "b"]);
        assert!(matches!(router.forward(), Err(RouteError::NothingToGoForward)));

        router.back().unwrap();
        router.back().unwrap();
        assert!(matches!(router.back(), Err(RouteError::NothingToGoBack)));
        assert!(router.query_snapshot().is_empty());
    }

    #[test]
    fn test_history_cap() {
        let router = Router::with_options(START, RouterOptions { max_history: 2 }).unwrap();
        router.navigate("?id=a").unwrap();
        router.navigate("?id=b").unwrap();

        let history = router.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].url, "https://app.test/transformations?id=b");
    }

    #[test]
    fn test_closed_router() {
        let router = Router::new(START).unwrap();
        let rx = router.subscribe();

        router.close();

        assert!(router.is_closed());
        assert!(rx.has_changed().is_err());
        assert!(router.subscribe().has_changed().is_err());
        assert!(matches!(router.navigate("?id=a"), Err(RouteError::Closed)));
    }
}
