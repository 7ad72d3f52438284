//! Latest dashboard snapshot for page rendering

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use sheetdash_core::{DashboardView, RenderSink};

/// Render sink that keeps the most recent view.
///
/// Handlers render from here instead of recomputing analytics on every
/// request.
#[derive(Default)]
pub struct ViewCache {
    latest: RwLock<Option<DashboardView>>,
    version: AtomicU64,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<DashboardView> {
        self.latest
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of views rendered so far
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

impl RenderSink for ViewCache {
    fn render(&self, view: &DashboardView) {
        let mut latest = self.latest.write().unwrap_or_else(|e| e.into_inner());
        *latest = Some(view.clone());
        self.version.fetch_add(1, Ordering::AcqRel);
    }
}
