//! CLI commands
//!
//! Each command drives the synchronizer against an in-process router and
//! reports where the route ended up.

pub mod ids;

use idsync_core::RouteStateProvider;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub url: String,
    pub ids: Vec<String>,
    pub navigations: u64,
}

impl RouteReport {
    pub fn capture(state: &AppState) -> Self {
        let route = state.sync().route();
        Self {
            url: route.current_url(),
            ids: state.sync().ids(),
            navigations: route.navigation_count(),
        }
    }
}
