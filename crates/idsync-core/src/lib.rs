//! idsync Core
//!
//! Keeps an ordered list of open items (transformation tabs, for example)
//! mirrored in the repeatable `id` query parameter of the current route.
//! The route layer owns the URL; the synchronizer only reads snapshots and
//! requests navigations.

mod config;
mod error;
mod sync;

pub use config::Config;
pub use error::{CoreError, SyncError};
pub use sync::{QueryParamSync, SyncConfig, DEFAULT_PARAM_KEY};

// Re-export the layers the synchronizer is built on
pub use idsync_query::{with_query, QueryError, QueryParams};
pub use idsync_route::{
    NavigationEntry, NavigationHistory, RouteError, RouteStateProvider, Router, RouterOptions,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    init_logging_at(tracing::level_filters::LevelFilter::INFO);
}

/// Initialize logging with a fallback level used when `RUST_LOG` is unset
pub fn init_logging_at(level: tracing::level_filters::LevelFilter) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
