// =============================================================================
// Central Application State — Meridian Direction Scanner
// =============================================================================
//
// The single source of truth for the service. Handlers hold an
// `Arc<AppState>` via axum's `State` extractor; the score store manages its
// own interior locking, so AppState itself needs no outer lock.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::ScannerConfig;
use crate::store::ScoreStore;

/// Shared application state, wrapped in `Arc` at startup.
pub struct AppState {
    /// Monotonically increasing version counter, incremented on every
    /// ingested update. Surfaced by `/health` so operators can see whether
    /// data is still flowing.
    pub state_version: AtomicU64,

    /// Immutable service configuration, fixed at startup.
    pub config: ScannerConfig,

    /// Per-symbol score state and history.
    pub store: ScoreStore,

    /// Instant when the service was started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            state_version: AtomicU64::new(1),
            config,
            store: ScoreStore::new(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Atomically increment the state version. Call after every ingested
    /// update.
    pub fn increment_version(&self) -> u64 {
        self.state_version.fetch_add(1, Ordering::SeqCst)
    }

    /// Read the current state version without modifying it.
    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::SeqCst)
    }
}
