//! Listing backend trait and implementations.
//!
//! This module defines the `ListingBackend` trait, which provides a unified
//! interface for fetching the flat key listing of one container, whatever
//! actually serves it (the Azure Blob REST API, an in-memory fixture, etc.).
//!

#[cfg(feature = "azure")]
mod azure;
#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "azure")]
pub use self::azure::AzureBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
use crate::error::Result;
use async_trait::async_trait;
use blobnav_listing::ListingEntry;
use futures::{Stream, TryStreamExt};
use std::pin::Pin;

pub type EntryStream<'a> = Pin<Box<dyn Stream<Item = Result<ListingEntry>> + Send + 'a>>;

/// How a backend treats a listing that the service splits over several
/// pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Pagination {
    /// Keep requesting pages until the service reports no continuation.
    #[default]
    Follow,
    /// Request the first page only. Large folders are truncated, with a
    /// warning logged when that happens.
    SinglePage,
}

/// Unified interface for listing backends.
///
/// A backend is bound to a single container when it is constructed. Listing
/// is read-only and never retried by the backend itself: a failure is
/// reported once, classified as one of the
/// [`ErrorKind`](crate::error::ErrorKind) variants.
///
/// # Examples
///
/// ```
/// use blobnav_storage::{ListingBackend, error::Result};
///
/// async fn total_size(backend: &dyn ListingBackend, prefix: &str) -> Result<u64> {
///     let entries = backend.list(prefix).await?;
///     Ok(entries.iter().map(|e| e.size).sum())
/// }
/// ```
#[async_trait]
pub trait ListingBackend: Send + Sync {
    /// Name of the backend, used for logging only.
    fn name(&self) -> &str;

    /// List all objects whose key starts with `prefix`.
    ///
    /// Default implementation of this method is to collect all the results
    /// from [`list_stream()`](Self::list_stream) into a [`Vec`] before
    /// returning.
    async fn list(&self, prefix: &str) -> Result<Vec<ListingEntry>> {
        self.list_stream(prefix).try_collect().await
    }

    /// Stream the objects whose key starts with `prefix`.
    ///
    /// Entries are yielded as soon as the backend has them (page by page for
    /// remote backends). An empty prefix lists the whole container. The
    /// stream ends after the first error.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures::TryStreamExt;
    /// # use blobnav_storage::{ListingBackend, error::Result};
    /// # async fn example(backend: &dyn ListingBackend) -> Result<()> {
    /// let mut stream = backend.list_stream("docs/");
    /// while let Some(entry) = stream.try_next().await? {
    ///     println!("{}: {} bytes", entry.key, entry.size);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn list_stream<'a>(&'a self, prefix: &'a str) -> EntryStream<'a>;
}
