//! In-memory session store backed by `RwLock`.
//!
//! The single owning session is the only writer, so a plain RwLock is
//! enough. Entries never expire individually; instead the store caps
//! the number of live reports and evicts the oldest when full, since a
//! long-lived process cannot rely on a session boundary for cleanup.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use crate::models::{Report, ReportHandle};

use super::{image_key, report_key, ReportStore, StoreError};

/// Default cap on live reports per store.
pub const DEFAULT_CAPACITY: usize = 32;

pub struct SessionReportStore {
    entries: RwLock<Inner>,
    capacity: usize,
}

#[derive(Default)]
struct Inner {
    values: HashMap<String, String>,
    /// Insertion order of report ids, oldest first.
    order: VecDeque<String>,
}

impl SessionReportStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Inner::default()),
            capacity: capacity.max(1),
        }
    }

    /// Number of live reports.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.order.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Called at the session boundary.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.entries.write() {
            inner.values.clear();
            inner.order.clear();
        }
    }
}

impl Default for SessionReportStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore for SessionReportStore {
    fn put(
        &self,
        id: &str,
        report: &Report,
        image_reference: Option<&str>,
    ) -> Result<(), StoreError> {
        let body =
            serde_json::to_string(report).map_err(|e| StoreError::Serialize(e.to_string()))?;

        let mut inner = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;

        // Re-putting an id refreshes its position instead of duplicating it.
        inner.order.retain(|existing| existing != id);
        while inner.order.len() >= self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                tracing::debug!(id = %evicted, "Evicting oldest report from session store");
                inner.values.remove(&report_key(&evicted));
                inner.values.remove(&image_key(&evicted));
            }
        }

        inner.values.insert(report_key(id), body);
        match image_reference {
            Some(image) => {
                inner.values.insert(image_key(id), image.to_string());
            }
            None => {
                inner.values.remove(&image_key(id));
            }
        }
        inner.order.push_back(id.to_string());
        Ok(())
    }

    fn get(&self, id: &str) -> Option<ReportHandle> {
        let inner = self.entries.read().ok()?;
        let body = inner.values.get(&report_key(id))?;
        // A malformed entry reads as absent.
        let report: Report = serde_json::from_str(body).ok()?;
        Some(ReportHandle {
            id: id.to_string(),
            report,
            image_reference: inner.values.get(&image_key(id)).cloned(),
        })
    }

    fn get_image(&self, id: &str) -> Option<String> {
        self.entries.read().ok()?.values.get(&image_key(id)).cloned()
    }
}
