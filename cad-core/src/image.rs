//! Owned, revocable handles to fetched image bytes.
//!
//! An [`ObjectUrls`] store turns bytes into a locally addressable URL and
//! revokes it later. [`ImageArtifact`] owns one such URL and revokes it when
//! dropped, so a superseded, stale or torn-down artifact is released exactly
//! once without any manual bookkeeping.

use crate::error::FetchError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Creates and revokes locally addressable URLs for binary data.
pub trait ObjectUrls: Clone {
    fn create(&self, bytes: &[u8], content_type: Option<&str>) -> Result<String, FetchError>;

    fn revoke(&self, url: &str);
}

/// A fetched image, valid until this value is dropped.
pub struct ImageArtifact<S: ObjectUrls> {
    url: String,
    byte_len: usize,
    store: S,
}

impl<S: ObjectUrls> ImageArtifact<S> {
    /// Register `bytes` with `store` and take ownership of the resulting URL.
    pub fn create(store: &S, bytes: &[u8], content_type: Option<&str>) -> Result<Self, FetchError> {
        let url = store.create(bytes, content_type)?;
        log::debug!("created image handle {} ({} bytes)", url, bytes.len());
        Ok(Self {
            url,
            byte_len: bytes.len(),
            store: store.clone(),
        })
    }

    pub fn image_url(&self) -> &str {
        &self.url
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

impl<S: ObjectUrls> Drop for ImageArtifact<S> {
    fn drop(&mut self) {
        log::debug!("revoking image handle {}", self.url);
        self.store.revoke(&self.url);
    }
}

impl<S: ObjectUrls> fmt::Debug for ImageArtifact<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageArtifact")
            .field("url", &self.url)
            .field("byte_len", &self.byte_len)
            .finish()
    }
}

impl<S: ObjectUrls> PartialEq for ImageArtifact<S> {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

#[derive(Default)]
struct MemoryInner {
    next_id: u64,
    live: HashMap<String, (Vec<u8>, Option<String>)>,
    created: usize,
    revoked: usize,
    high_water: usize,
}

/// In-process URL store keeping image bytes in memory.
///
/// Used by the command line tool to hold fetched bytes until they are
/// written out, and by tests to count live handles.
#[derive(Clone, Default)]
pub struct MemoryUrls {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.inner.borrow().live.len()
    }

    /// Largest number of handles that were ever live at the same time.
    pub fn high_water(&self) -> usize {
        self.inner.borrow().high_water
    }

    pub fn created_count(&self) -> usize {
        self.inner.borrow().created
    }

    pub fn revoked_count(&self) -> usize {
        self.inner.borrow().revoked
    }

    /// Bytes behind a live handle.
    pub fn bytes(&self, url: &str) -> Option<Vec<u8>> {
        self.inner.borrow().live.get(url).map(|(b, _)| b.clone())
    }

    pub fn content_type(&self, url: &str) -> Option<String> {
        self.inner
            .borrow()
            .live
            .get(url)
            .and_then(|(_, ct)| ct.clone())
    }
}

impl ObjectUrls for MemoryUrls {
    fn create(&self, bytes: &[u8], content_type: Option<&str>) -> Result<String, FetchError> {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let url = format!("mem://image/{}", inner.next_id);
        inner
            .live
            .insert(url.clone(), (bytes.to_vec(), content_type.map(str::to_string)));
        inner.created += 1;
        inner.high_water = inner.high_water.max(inner.live.len());
        Ok(url)
    }

    fn revoke(&self, url: &str) {
        let mut inner = self.inner.borrow_mut();
        if inner.live.remove(url).is_some() {
            inner.revoked += 1;
        } else {
            log::warn!("revoke of unknown or already revoked handle {}", url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_revokes_exactly_once() {
        let store = MemoryUrls::new();
        let artifact = ImageArtifact::create(&store, b"png", Some("image/png")).unwrap();
        let url = artifact.image_url().to_string();
        assert_eq!(store.live_count(), 1);
        assert_eq!(store.bytes(&url), Some(b"png".to_vec()));
        assert_eq!(store.content_type(&url).as_deref(), Some("image/png"));
        assert_eq!(artifact.byte_len(), 3);

        drop(artifact);
        assert_eq!(store.live_count(), 0);
        assert_eq!(store.revoked_count(), 1);
        assert_eq!(store.bytes(&url), None);
    }

    #[test]
    fn test_replacing_releases_previous() {
        let store = MemoryUrls::new();
        let mut current = Some(ImageArtifact::create(&store, b"one", None).unwrap());
        for _ in 0..5 {
            drop(current.take());
            current = Some(ImageArtifact::create(&store, b"next", None).unwrap());
            assert_eq!(store.live_count(), 1);
        }
        drop(current);
        assert_eq!(store.created_count(), 6);
        assert_eq!(store.revoked_count(), 6);
        assert_eq!(store.high_water(), 1);
    }
}
