//! Navigation state.
//!
//! A [`Navigator`] owns the current path of one browsing session and the
//! last listing it displayed. Every navigation runs the same cycle: fetch the
//! flat listing below the target path, project it, build the breadcrumb
//! trail, hand both to the [`Renderer`], then commit the new path.
//!
//! Navigations take `&self`, so a caller may start a second one before the
//! first has finished. Nothing is cancelled. Which completion ends up on
//! screen is decided by the [`StalePolicy`].

use crate::error::{ErrorKind, Result};
use crate::render::{FileOpener, Renderer};
use blobnav_listing::{Breadcrumb, ContainerAddress, Node, Resolved, build_trail, path, project};
use blobnav_storage::BackendHandle;
use exn::ResultExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::instrument;
use url::Url;

/// What to do with a listing that completes after a newer navigation was
/// started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StalePolicy {
    /// Render every completion as it lands; the last one to arrive wins,
    /// even if it belongs to an older request.
    #[default]
    LastResponseWins,
    /// Only the most recently started navigation may render or commit;
    /// older completions are dropped.
    LatestRequestWins,
}

/// How a navigation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The folder was displayed with this many children.
    Listed(usize),
    /// The folder was displayed and has no children.
    Empty,
    /// A newer navigation was started meanwhile; nothing was displayed or
    /// committed. Only happens under [`StalePolicy::LatestRequestWins`].
    Stale,
}

#[derive(Debug, Default)]
struct View {
    current_path: String,
    nodes: Vec<Node>,
    trail: Vec<Breadcrumb>,
}

/// Single-owner navigation state for one container.
pub struct Navigator<R: Renderer> {
    address: ContainerAddress,
    backend: BackendHandle,
    renderer: R,
    policy: StalePolicy,
    view: Mutex<View>,
    /// Ticket of the most recently started navigation.
    issued: AtomicU64,
}

impl<R: Renderer> Navigator<R> {
    /// Create a navigator positioned at the resolver's initial path.
    ///
    /// Nothing is fetched until [`connect()`](Self::connect) (or any other
    /// navigation) is called.
    pub fn new(resolved: Resolved, backend: BackendHandle, renderer: R) -> Self {
        let Resolved { address, initial_path } = resolved;
        let trail = build_trail(address.container(), &initial_path);
        Self {
            address,
            backend,
            renderer,
            policy: StalePolicy::default(),
            view: Mutex::new(View {
                current_path: path::normalize(&initial_path),
                nodes: Vec::new(),
                trail,
            }),
            issued: AtomicU64::new(0),
        }
    }

    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn address(&self) -> &ContainerAddress {
        &self.address
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Path of the folder currently displayed; empty for the container root.
    pub fn current_path(&self) -> String {
        self.view().current_path.clone()
    }

    /// Children of the current folder, as last displayed.
    pub fn nodes(&self) -> Vec<Node> {
        self.view().nodes.clone()
    }

    /// Breadcrumb trail of the current folder.
    pub fn trail(&self) -> Vec<Breadcrumb> {
        self.view().trail.clone()
    }

    /// Look up a child of the current folder by name.
    pub fn child(&self, name: &str) -> Option<Node> {
        self.view().nodes.iter().find(|node| node.name == name).cloned()
    }

    /// Display the initial path.
    pub async fn connect(&self) -> Result<Outcome> {
        let path = self.current_path();
        self.navigate(&path).await
    }

    /// Display a sub-folder, given its full path.
    pub async fn descend_into(&self, folder_full_path: &str) -> Result<Outcome> {
        self.navigate(folder_full_path).await
    }

    /// Display an arbitrary path, typically one taken from a breadcrumb.
    pub async fn jump_to(&self, path: &str) -> Result<Outcome> {
        self.navigate(path).await
    }

    /// Display the parent of the current folder. The root is its own parent.
    pub async fn ascend(&self) -> Result<Outcome> {
        let parent = path::parent(&self.current_path());
        self.navigate(&parent).await
    }

    /// Fetch and display the current folder again.
    pub async fn refresh(&self) -> Result<Outcome> {
        let path = self.current_path();
        self.navigate(&path).await
    }

    /// Hand a file's direct URL to `opener`.
    ///
    /// # Errors
    /// [`NotAFile`](ErrorKind::NotAFile) for folders; the opener is not
    /// called.
    pub fn open(&self, node: &Node, opener: &dyn FileOpener) -> Result<Url> {
        if node.is_folder() {
            exn::bail!(ErrorKind::NotAFile(node.full_path.clone()));
        }
        let url = self.address.object_url(&node.full_path);
        tracing::info!(path = %node.full_path, %url, "Opening file");
        opener.open(&url);
        Ok(url)
    }

    #[instrument(skip(self), fields(backend = self.backend.name(), ticket))]
    async fn navigate(&self, requested: &str) -> Result<Outcome> {
        let path = path::normalize(requested);
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::Span::current().record("ticket", ticket);
        self.renderer.set_loading(true);

        let listing = self.backend.list(&path::listing_prefix(&path)).await;
        if self.policy == StalePolicy::LatestRequestWins && ticket != self.issued.load(Ordering::SeqCst) {
            // The newer navigation owns the loading indicator now.
            tracing::debug!(%path, "Discarding stale listing");
            return Ok(Outcome::Stale);
        }

        let entries = match listing {
            Ok(entries) => entries,
            Err(e) => {
                let message = (*e).to_string();
                tracing::warn!(%path, error = %message, "Listing failed");
                self.renderer.show_error(Some(&message));
                self.renderer.set_loading(false);
                return Err(e).or_raise(|| ErrorKind::Fetch);
            },
        };

        let nodes = project(&entries, &path);
        let trail = build_trail(self.address.container(), &path);
        self.renderer.show_error(None);
        self.renderer.show_trail(&trail);
        let outcome = match nodes.is_empty() {
            true => {
                self.renderer.show_empty();
                Outcome::Empty
            },
            false => {
                self.renderer.show_folder(&nodes);
                Outcome::Listed(nodes.len())
            },
        };
        tracing::debug!(%path, entries = entries.len(), nodes = nodes.len(), "Folder displayed");
        *self.view() = View {
            current_path: path,
            nodes,
            trail,
        };
        self.renderer.set_loading(false);
        Ok(outcome)
    }

    fn view(&self) -> MutexGuard<'_, View> {
        // The view is replaced wholesale, never left half-written.
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
