//! Collaborators the navigator hands its results to.

use blobnav_listing::{Breadcrumb, Node};
use url::Url;

/// Draws navigation results.
///
/// Every method is a plain notification; the navigator never reads anything
/// back. Calls for one navigation always arrive in the same order: loading
/// on, then (on success) error cleared, trail, folder or empty, and finally
/// loading off.
pub trait Renderer {
    /// Show or hide the loading indicator.
    fn set_loading(&self, loading: bool);
    /// Show the error banner, or hide it when `message` is `None`.
    fn show_error(&self, message: Option<&str>);
    /// Display the children of the current folder, folders first.
    fn show_folder(&self, nodes: &[Node]);
    /// Display the "this folder is empty" state.
    fn show_empty(&self);
    /// Display the breadcrumb trail; the first crumb is the container.
    fn show_trail(&self, trail: &[Breadcrumb]);
}

/// Opens a file's direct URL somewhere else (a browser tab, a pager, ...).
///
/// Only ever called with files; folders have no URL.
pub trait FileOpener {
    fn open(&self, url: &Url);
}
