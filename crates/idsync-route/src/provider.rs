//! Route state capability consumed by the synchronizer

use idsync_query::QueryParams;
use tokio::sync::watch;

use crate::Result;

pub trait RouteStateProvider: Send + Sync {
    /// Full current URL
    fn current_url(&self) -> String;

    /// Point-in-time copy of the current query parameters
    fn query_snapshot(&self) -> QueryParams;

    /// Live stream of query parameters. The receiver's current value is the
    /// state at subscription time.
    fn subscribe(&self) -> watch::Receiver<QueryParams>;

    /// Ask the routing layer to move to `url`
    fn navigate(&self, url: &str) -> Result<()>;
}
