//! Last known reachability of the remote API.
//!
//! Every remote call updates the tracker as a side effect; views read it to
//! show a non-fatal "demo/offline mode" banner instead of failing hard.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

/// Advisory probe interval surfaced to views alongside the flag.
const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Snapshot of the tracker state. Not persisted across restarts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ServerStatus {
    pub available: bool,
    pub last_check: Option<DateTime<Utc>>,
    /// Advisory only; no consumer logic reads it today.
    pub check_interval_ms: u64,
}

impl Default for ServerStatus {
    fn default() -> Self {
        Self {
            available: true,
            last_check: None,
            check_interval_ms: DEFAULT_CHECK_INTERVAL.as_millis() as u64,
        }
    }
}

/// Shared tracker mutated by every API call. One instance per running
/// application; clones of the client share it through the context.
#[derive(Debug, Default)]
pub struct ServerStatusTracker {
    inner: RwLock<ServerStatus>,
}

impl ServerStatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .available
    }

    pub fn snapshot(&self) -> ServerStatus {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn mark_available(&self) {
        let mut status = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !status.available {
            debug!("remote API reachable again");
        }
        status.available = true;
        status.last_check = Some(Utc::now());
    }

    pub fn mark_unavailable(&self) {
        let mut status = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if status.available {
            warn!("remote API unreachable, switching to offline data");
        }
        status.available = false;
        status.last_check = Some(Utc::now());
    }
}
