//! Preview resource management.
//!
//! Intake derives a local, revocable preview from an accepted photo.
//! The preview handle is exclusively owned and must be released on
//! every exit path — re-selection and navigation away included — to
//! avoid leaking handles. `PreviewGuard` ties the release to `Drop`,
//! and acquiring through the same guard releases the superseded entry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// Raw preview payload held behind a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Registry of live preview handles.
#[derive(Default)]
pub struct PreviewStore {
    entries: Mutex<HashMap<Uuid, PreviewImage>>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, image: PreviewImage) -> Uuid {
        let id = Uuid::new_v4();
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(id, image);
        }
        id
    }

    fn remove(&self, id: &Uuid) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(id);
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<PreviewImage> {
        self.entries.lock().ok()?.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive owner of at most one live preview. Acquiring a new
/// preview releases the previous one; dropping the guard releases
/// whatever is held.
pub struct PreviewGuard {
    store: Arc<PreviewStore>,
    current: Option<Uuid>,
}

impl PreviewGuard {
    pub fn new(store: Arc<PreviewStore>) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Derive a preview for a newly accepted photo. Any previously
    /// held preview is released first.
    pub fn acquire(&mut self, mime: &str, bytes: &[u8]) -> Uuid {
        self.release();
        let id = self.store.insert(PreviewImage {
            mime: mime.to_string(),
            bytes: bytes.to_vec(),
        });
        self.current = Some(id);
        id
    }

    /// Release the held preview, if any.
    pub fn release(&mut self) {
        if let Some(id) = self.current.take() {
            self.store.remove(&id);
        }
    }

    pub fn current(&self) -> Option<Uuid> {
        self.current
    }

    /// Local path under which the preview can be served.
    pub fn url(&self) -> Option<String> {
        self.current.map(|id| format!("/previews/{id}"))
    }
}

impl Drop for PreviewGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_registers_preview() {
        let store = Arc::new(PreviewStore::new());
        let mut guard = PreviewGuard::new(store.clone());

        let id = guard.acquire("image/jpeg", b"jpeg-bytes");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().bytes, b"jpeg-bytes");
        assert_eq!(guard.url().unwrap(), format!("/previews/{id}"));
    }

    #[test]
    fn reselection_releases_previous_preview() {
        let store = Arc::new(PreviewStore::new());
        let mut guard = PreviewGuard::new(store.clone());

        let first = guard.acquire("image/jpeg", b"first");
        let second = guard.acquire("image/png", b"second");

        assert_ne!(first, second);
        assert_eq!(store.len(), 1, "Superseded preview must be released");
        assert!(store.get(&first).is_none());
        assert_eq!(store.get(&second).unwrap().mime, "image/png");
    }

    #[test]
    fn drop_releases_preview() {
        let store = Arc::new(PreviewStore::new());
        {
            let mut guard = PreviewGuard::new(store.clone());
            guard.acquire("image/jpeg", b"bytes");
            assert_eq!(store.len(), 1);
        }
        assert!(store.is_empty(), "Drop must release the handle");
    }

    #[test]
    fn explicit_release_is_idempotent() {
        let store = Arc::new(PreviewStore::new());
        let mut guard = PreviewGuard::new(store.clone());
        guard.acquire("image/jpeg", b"bytes");

        guard.release();
        guard.release();
        assert!(store.is_empty());
        assert!(guard.current().is_none());
        assert!(guard.url().is_none());
    }
}
