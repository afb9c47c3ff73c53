//! In-memory listing backend for testing.

use super::EntryStream;
use crate::ListingBackend;
use crate::error::ErrorKind;
use async_stream::stream;
use async_trait::async_trait;
use blobnav_listing::ListingEntry;
use std::sync::atomic::{AtomicUsize, Ordering};
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// In-memory listing backend for testing.
///
/// Entries are stored in a `Vec` behind a [`RwLock`], so all methods can
/// operate on `&self` without external synchronisation. A failure can be
/// injected to exercise error paths, and every listing request is counted.
///
/// # Examples
///
/// ```
/// use blobnav_storage::backend::{ListingBackend, MockBackend};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MockBackend::with_keys([
///     ("readme.txt", 10),
///     ("docs/intro.md", 5),
/// ]);
/// let docs = backend.list("docs/").await?;
/// assert_eq!(docs.len(), 1);
/// assert_eq!(backend.requests(), 1);
/// # Ok(())
/// # }
/// ```
pub struct MockBackend {
    name: String,
    entries: RwLock<Vec<ListingEntry>>,
    failure: RwLock<Option<ErrorKind>>,
    requests: AtomicUsize,
}

impl MockBackend {
    /// Create a mock backend pre-populated with entries, kept in the given
    /// order.
    pub fn with_entries(entries: impl IntoIterator<Item = ListingEntry>) -> Self {
        Self {
            name: "mock".to_string(),
            entries: RwLock::new(entries.into_iter().collect()),
            failure: RwLock::new(None),
            requests: AtomicUsize::new(0),
        }
    }

    /// Create a mock backend from `(key, size)` pairs, all modified "now".
    pub fn with_keys(keys: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self::with_entries(keys.into_iter().map(|(key, size)| ListingEntry::new(key, size).with_last_modified(now)))
    }

    /// Change the name of the mock backend.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Make every listing fail with `kind` until cleared.
    pub fn with_failure(mut self, kind: ErrorKind) -> Self {
        *self.failure.get_mut() = Some(kind);
        self
    }

    /// Set or clear the injected failure.
    pub async fn set_failure(&self, kind: Option<ErrorKind>) {
        *self.failure.write().await = kind;
    }

    /// Add an object to the listing.
    pub async fn insert(&self, entry: ListingEntry) {
        self.entries.write().await.push(entry);
    }

    /// Number of listing requests served (or failed) so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}
impl Default for MockBackend {
    fn default() -> Self {
        Self::with_entries([])
    }
}

#[async_trait]
impl ListingBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_stream<'a>(&'a self, prefix: &'a str) -> EntryStream<'a> {
        Box::pin(stream! {
            self.requests.fetch_add(1, Ordering::SeqCst);
            let failure = self.failure.read().await.clone();
            if let Some(kind) = failure {
                yield Err(exn::Exn::from(kind));
                return;
            }
            // Lock must not be held across a yield.
            let entries: Vec<ListingEntry> = {
                let guard = self.entries.read().await;
                guard.iter().filter(|entry| entry.key.starts_with(prefix)).cloned().collect()
            };
            for entry in entries {
                yield Ok(entry);
            }
        })
    }
}
