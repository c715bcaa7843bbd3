//! Route error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("No earlier history entry")]
    NothingToGoBack,

    #[error("No later history entry")]
    NothingToGoForward,

    #[error("Router is closed")]
    Closed,
}
