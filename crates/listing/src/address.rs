//! Container address resolution.
//!
//! Turns a user-supplied endpoint such as
//! `https://acct.blob.core.windows.net/mycontainer/docs` into the address of
//! the container (`acct`, `mycontainer`) and the path to start browsing at
//! (`docs`).

use crate::error::{ErrorKind, Result};
use crate::path;
use exn::{OptionExt, ResultExt};
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Blob service hostnames of the public clouds; `account` is the storage account.
static BLOB_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<account>[a-z0-9]{3,24})\.blob\.core\.(?:windows\.net|chinacloudapi\.cn|usgovcloudapi\.net|cloudapi\.de)$")
        .unwrap()
});

/// Address of a single blob container.
///
/// Only [`resolve`] creates these, so an address that exists is always
/// complete and valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerAddress {
    account: String,
    container: String,
    base_url: Url,
}
impl ContainerAddress {
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// `<scheme>://<host>/<container>`, with no query or fragment.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Direct URL of an object in this container.
    ///
    /// Each key segment is percent-encoded separately so that `/` keeps its
    /// meaning as the delimiter.
    ///
    /// ```
    /// let resolved = blobnav_listing::resolve("https://acct.blob.core.windows.net/box").unwrap();
    /// let url = resolved.address.object_url("docs/read me.txt");
    /// assert_eq!(url.as_str(), "https://acct.blob.core.windows.net/box/docs/read%20me.txt");
    /// ```
    pub fn object_url(&self, full_path: &str) -> Url {
        let mut url = self.base_url.clone();
        // An http(s) base can always be a base, so this never skips.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path::segments(full_path));
        }
        url
    }
}

/// Result of resolving an endpoint: where the container is and where to
/// start browsing inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub address: ContainerAddress,
    /// Canonical browse path; empty for the container root
    pub initial_path: String,
}

/// Resolve a raw endpoint URL into a container address.
///
/// # Errors
/// - [`MalformedUrl`](ErrorKind::MalformedUrl) if the input is not an
///   absolute `http`/`https` URL with a host.
/// - [`NotABlobEndpoint`](ErrorKind::NotABlobEndpoint) if the host is not
///   `<account>.blob.core.<cloud>`.
/// - [`MissingContainer`](ErrorKind::MissingContainer) if the path is empty.
///
/// # Examples
///
/// ```
/// use blobnav_listing::resolve;
///
/// let resolved = resolve("https://acct.blob.core.windows.net/mycontainer/docs").unwrap();
/// assert_eq!(resolved.address.account(), "acct");
/// assert_eq!(resolved.address.container(), "mycontainer");
/// assert_eq!(resolved.initial_path, "docs");
///
/// assert!(resolve("https://example.com/foo").is_err());
/// ```
pub fn resolve(raw: &str) -> Result<Resolved> {
    let raw = raw.trim();
    let url = Url::parse(raw).or_raise(|| ErrorKind::MalformedUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        exn::bail!(ErrorKind::MalformedUrl(raw.to_string()));
    }
    let host = url.host_str().ok_or_raise(|| ErrorKind::MalformedUrl(raw.to_string()))?;
    let account = BLOB_HOST
        .captures(host)
        .and_then(|captures| captures.name("account"))
        .map(|account| account.as_str().to_string())
        .ok_or_raise(|| ErrorKind::NotABlobEndpoint(host.to_string()))?;

    // Segments of `Url::path()` are still percent-encoded.
    let encoded: Vec<&str> = path::segments(url.path()).collect();
    let (first, rest) = encoded.split_first().ok_or_raise(|| ErrorKind::MissingContainer(raw.to_string()))?;
    let decode = |segment: &&str| percent_decode_str(segment).decode_utf8_lossy().into_owned();
    let container = decode(first);
    let initial_path = path::normalize(&rest.iter().map(decode).collect::<Vec<_>>().join("/"));

    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);
    base_url.set_path(&format!("/{first}"));

    tracing::debug!(%account, %container, path = %initial_path, "Resolved container address");
    Ok(Resolved {
        address: ContainerAddress {
            account,
            container,
            base_url,
        },
        initial_path,
    })
}
