//! idsync Route State
//!
//! The routing layer owns the current URL. Consumers read a snapshot of its
//! query parameters, subscribe to a live stream of them, or request a
//! navigation to a new URL.

mod error;
mod history;
mod provider;
mod router;

pub use error::RouteError;
pub use history::{NavigationEntry, NavigationHistory};
pub use provider::RouteStateProvider;
pub use router::{Router, RouterOptions};

pub type Result<T> = std::result::Result<T, RouteError>;
