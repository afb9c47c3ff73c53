//! Azure Blob Storage listing backend.
//!
//! Lists a public container anonymously through the Blob service REST API
//! (`List Blobs`), parsing the XML `EnumerationResults` document page by
//! page.
//!
//! # Credentials
//!
//! None. Only containers with anonymous (public) list access can be browsed;
//! anything else surfaces as [`NotFound`](ErrorKind::NotFound) or
//! [`Forbidden`](ErrorKind::Forbidden), depending on what the service feels
//! like answering.

use crate::{
    ListingBackend, Pagination,
    backend::EntryStream,
    error::{Error, ErrorKind, Result},
};
use async_stream::stream;
use async_trait::async_trait;
use blobnav_listing::{ContainerAddress, ListingEntry};
use exn::{OptionExt, ResultExt};
use quick_xml::{Reader, events::Event};
use reqwest::{Client, Url};
use std::time::Duration;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Used when the caller doesn't configure a timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// REST API version sent with every request. Anything from 2009-09-19
/// onwards returns the `NextMarker` element we rely on.
const API_VERSION: &str = "2021-08-06";
/// `Last-Modified` is an RFC 1123 date, always in GMT.
const LAST_MODIFIED: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT");

/// Azure Blob Storage listing backend.
///
/// Bound to one container. Each listing is one `GET` per page; no request
/// is ever retried.
///
/// # Examples
///
/// ```no_run
/// use blobnav_storage::{ListingBackend, Pagination, backend::AzureBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let resolved = blobnav_listing::resolve("https://acct.blob.core.windows.net/box")?;
/// let backend = AzureBackend::new(resolved.address, Pagination::Follow, None)?;
/// for entry in backend.list("docs/").await? {
///     println!("{} ({} bytes)", entry.key, entry.size);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AzureBackend {
    name: String,
    client: Client,
    address: ContainerAddress,
    pagination: Pagination,
}

impl AzureBackend {
    /// Create a new Azure listing backend.
    ///
    /// # Arguments
    /// * `address` - The container to list
    /// * `pagination` - Whether to follow continuation markers
    /// * `timeout` - Per-request timeout (defaults to 30 seconds)
    pub fn new(address: ContainerAddress, pagination: Pagination, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .or_raise(|| ErrorKind::Transport("could not initialise HTTP client".to_string()))?;
        Ok(Self {
            name: format!("azure:{}/{}", address.account(), address.container()),
            client,
            address,
            pagination,
        })
    }

    /// URL of one `List Blobs` page.
    fn page_url(&self, prefix: &str, marker: Option<&str>) -> Url {
        let mut url = self.address.base_url().clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("restype", "container").append_pair("comp", "list");
            if !prefix.is_empty() {
                query.append_pair("prefix", prefix);
            }
            if let Some(marker) = marker {
                query.append_pair("marker", marker);
            }
        }
        url
    }

    async fn fetch_page(&self, prefix: &str, marker: Option<&str>) -> Result<Page> {
        let url = self.page_url(prefix, marker);
        tracing::debug!(backend = %self.name, %url, "Requesting listing page");
        let response = self.client.get(url).header("x-ms-version", API_VERSION).send().await.map_err(transport)?;
        let status = response.status();
        if let Some(kind) = ErrorKind::from_status(status.as_u16(), status.canonical_reason()) {
            tracing::info!(backend = %self.name, status = status.as_u16(), "Listing request rejected");
            exn::bail!(kind);
        }
        let body = response.text().await.map_err(transport)?;
        parse_page(&body)
    }
}

fn transport(err: reqwest::Error) -> Error {
    let message = err.to_string();
    exn::Exn::new(err).raise(ErrorKind::Transport(message))
}

#[async_trait]
impl ListingBackend for AzureBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_stream<'a>(&'a self, prefix: &'a str) -> EntryStream<'a> {
        paginate(&self.name, prefix, self.pagination, move |marker: Option<String>| async move {
            self.fetch_page(prefix, marker.as_deref()).await
        })
    }
}

/// Drive `fetch` page by page, starting without a marker, and stream the
/// entries of every page in order.
///
/// With [`Pagination::Follow`] each `NextMarker` is passed to the next
/// `fetch`; with [`Pagination::SinglePage`] the stream stops after the first
/// page. The stream ends after the first error.
fn paginate<'a, F, Fut>(name: &'a str, prefix: &'a str, pagination: Pagination, fetch: F) -> EntryStream<'a>
where
    F: Fn(Option<String>) -> Fut + Send + 'a,
    Fut: Future<Output = Result<Page>> + Send + 'a,
{
    Box::pin(stream! {
        let mut marker: Option<String> = None;
        let mut pages = 0usize;
        loop {
            let page = match fetch(marker.take()).await {
                Ok(page) => page,
                Err(e) => {
                    yield Err(e);
                    break;
                },
            };
            pages += 1;
            for entry in page.entries {
                yield Ok(entry);
            }
            match (pagination, page.next_marker) {
                (Pagination::Follow, Some(next)) => marker = Some(next),
                (Pagination::SinglePage, Some(_)) => {
                    tracing::warn!(backend = %name, prefix, "Listing truncated after first page");
                    break;
                },
                (_, None) => break,
            }
        }
        tracing::debug!(backend = %name, prefix, pages, "Listing complete");
    })
}

/// One parsed `EnumerationResults` document.
#[derive(Debug, Default, PartialEq, Eq)]
struct Page {
    entries: Vec<ListingEntry>,
    next_marker: Option<String>,
}

#[derive(Default)]
struct BlobFields {
    name: Option<String>,
    size: u64,
    last_modified: Option<OffsetDateTime>,
}
impl BlobFields {
    fn into_entry(self) -> Result<ListingEntry> {
        let name = self.name.ok_or_raise(|| ErrorKind::Transport("listing contains a blob without a name".to_string()))?;
        Ok(ListingEntry {
            key: name,
            size: self.size,
            last_modified: self.last_modified,
        })
    }
}

fn malformed() -> ErrorKind {
    ErrorKind::Transport("malformed listing response".to_string())
}

/// Parse a `List Blobs` response body.
///
/// Only `Blob/Name`, `Blob/Properties/Content-Length`,
/// `Blob/Properties/Last-Modified` and the top-level `NextMarker` are read;
/// everything else is skipped. Blob names are kept byte for byte, including
/// leading and trailing whitespace. A body that isn't a complete
/// `EnumerationResults` document is malformed.
fn parse_page(xml: &str) -> Result<Page> {
    let mut reader = Reader::from_str(xml.trim_start_matches('\u{feff}'));
    let mut page = Page::default();
    let mut path: Vec<String> = Vec::new();
    let mut blob: Option<BlobFields> = None;
    let mut complete = false;
    loop {
        match reader.read_event().or_raise(malformed)? {
            Event::Start(e) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if path.is_empty() && (complete || tag != "EnumerationResults") {
                    exn::bail!(malformed());
                }
                if tag == "Blob" {
                    blob = Some(BlobFields::default());
                }
                path.push(tag);
            },
            Event::Empty(e) if path.is_empty() => {
                if complete || e.local_name().as_ref() != b"EnumerationResults" {
                    exn::bail!(malformed());
                }
                complete = true;
            },
            Event::End(e) => {
                path.pop();
                if e.local_name().as_ref() == b"Blob"
                    && let Some(fields) = blob.take()
                {
                    page.entries.push(fields.into_entry()?);
                }
                if path.is_empty() {
                    complete = true;
                }
            },
            Event::Text(e) => {
                let text = e.unescape().or_raise(malformed)?;
                let tail: Vec<&str> = path.iter().map(String::as_str).collect();
                match (tail.as_slice(), blob.as_mut()) {
                    ([.., "Blob", "Name"], Some(fields)) => {
                        fields.name.get_or_insert_with(String::new).push_str(&text);
                    },
                    ([.., "Blob", "Properties", "Content-Length"], Some(fields)) => {
                        fields.size = text.trim().parse::<u64>().or_raise(malformed)?;
                    },
                    ([.., "Blob", "Properties", "Last-Modified"], Some(fields)) => {
                        let text = text.trim();
                        fields.last_modified = match PrimitiveDateTime::parse(text, LAST_MODIFIED) {
                            Ok(modified) => Some(modified.assume_utc()),
                            Err(e) => {
                                tracing::debug!(value = %text, error = %e, "Ignoring unparseable Last-Modified");
                                None
                            },
                        };
                    },
                    (["EnumerationResults", "NextMarker"], _) => {
                        let marker = text.trim();
                        if !marker.is_empty() {
                            page.next_marker = Some(marker.to_string());
                        }
                    },
                    _ => {},
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }
    if !complete || !path.is_empty() {
        exn::bail!(malformed());
    }
    Ok(page)
}
