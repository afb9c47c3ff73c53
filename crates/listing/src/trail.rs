//! Breadcrumb trail.

use crate::models::Breadcrumb;
use crate::path;

/// Build the breadcrumb trail for `current_path`.
///
/// The first crumb is always the container itself (path `""`), followed by
/// one crumb per path segment, each pointing at the path accumulated so far.
///
/// ```
/// use blobnav_listing::{Breadcrumb, build_trail};
///
/// assert_eq!(
///     build_trail("mycontainer", "docs/ch1"),
///     [
///         Breadcrumb::new("mycontainer", ""),
///         Breadcrumb::new("docs", "docs"),
///         Breadcrumb::new("ch1", "docs/ch1"),
///     ]
/// );
/// ```
pub fn build_trail(container_label: &str, current_path: &str) -> Vec<Breadcrumb> {
    let mut trail = vec![Breadcrumb::new(container_label, "")];
    let mut running = String::new();
    for segment in path::segments(current_path) {
        running = path::join(&running, segment);
        trail.push(Breadcrumb::new(segment, running.clone()));
    }
    trail
}
