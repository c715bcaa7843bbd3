//! idsync Query Parameters
//!
//! Structured handling of URL query strings. Keys may repeat and pair order
//! is kept as it appears in the URL, so a repeated `id` key can carry an
//! ordered list of open items.

mod error;
mod params;

pub use error::QueryError;
pub use params::{parse_url, with_query, QueryParams};

pub type Result<T> = std::result::Result<T, QueryError>;
