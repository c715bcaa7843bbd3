//! Core error types

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Identifier cannot be empty")]
    EmptyIdentifier,

    #[error("Timed out after {0:?} waiting for query parameter")]
    Timeout(Duration),

    #[error("Route stream closed before the query parameter appeared")]
    RouteClosed,

    #[error("Route error: {0}")]
    Route(#[from] idsync_route::RouteError),

    #[error("Query error: {0}")]
    Query(#[from] idsync_query::QueryError),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Route error: {0}")]
    Route(#[from] idsync_route::RouteError),

    #[error("Query error: {0}")]
    Query(#[from] idsync_query::QueryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
