//! Id commands

use std::time::Duration;

use idsync_core::Result;

use super::RouteReport;
use crate::state::AppState;

/// Add each id in order, skipping ones already present
pub fn add_ids(state: &AppState, ids: &[String]) -> Result<RouteReport> {
    for id in ids {
        if !state.sync().add_id(id)? {
            tracing::debug!(id = %id, "Already open, skipped");
        }
    }
    Ok(RouteReport::capture(state))
}

/// Delete each id in order
pub fn delete_ids(state: &AppState, ids: &[String]) -> Result<RouteReport> {
    for id in ids {
        if !state.sync().delete_id(id)? {
            tracing::debug!(id = %id, "Not open, skipped");
        }
    }
    Ok(RouteReport::capture(state))
}

/// Wait for the tracked key, then report its ids
pub async fn list_ids(state: &AppState, timeout: Option<Duration>) -> Result<RouteReport> {
    let ids = match timeout {
        Some(timeout) => state.sync().get_ids_within(timeout).await?,
        None => state.sync().get_ids().await?,
    };

    let mut report = RouteReport::capture(state);
    report.ids = ids;
    Ok(report)
}
