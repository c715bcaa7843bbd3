//! Query error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
