//! Listing projection.
//!
//! A container only stores objects under flat keys. Browsing a "folder"
//! means taking every key below a prefix and collapsing it into the set of
//! immediate children: keys with no further `/` become files, and keys with
//! further segments contribute a synthetic folder named by their first
//! segment.

use crate::models::{ListingEntry, Node};
use crate::path;
use std::collections::HashSet;
use tracing::instrument;

/// Project a flat listing into the direct children of `current_path`.
///
/// Folders come first in the order they were first seen, then files in
/// listing order. A folder shadows any file with the same name at the same
/// level. Entries outside `current_path` are ignored, as is the placeholder
/// entry some stores keep for the folder itself. An empty result means the
/// folder is empty, which is not an error.
///
/// # Examples
///
/// ```
/// use blobnav_listing::{ListingEntry, project};
///
/// let entries = [
///     ListingEntry::new("readme.txt", 10),
///     ListingEntry::new("docs/intro.md", 5),
///     ListingEntry::new("docs/ch1/page.md", 8),
/// ];
/// let names: Vec<_> = project(&entries, "").into_iter().map(|n| n.name).collect();
/// assert_eq!(names, ["docs", "readme.txt"]);
///
/// let names: Vec<_> = project(&entries, "docs").into_iter().map(|n| n.name).collect();
/// assert_eq!(names, ["ch1", "intro.md"]);
/// ```
#[instrument(skip(entries), fields(entries = entries.len(), nodes))]
pub fn project(entries: &[ListingEntry], current_path: &str) -> Vec<Node> {
    let current = path::normalize(current_path);
    let prefix = path::listing_prefix(&current);

    let mut folders: Vec<Node> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut files: Vec<(&str, &ListingEntry)> = Vec::new();

    for entry in entries {
        let Some(relative) = entry.key.strip_prefix(prefix.as_str()) else {
            continue;
        };
        if relative.is_empty() {
            continue;
        }
        match relative.split_once('/') {
            None => files.push((relative, entry)),
            // No usable name; `a//b` or a key with a leading slash.
            Some(("", _)) => {},
            Some((name, _)) => {
                if seen.insert(name) {
                    folders.push(Node::folder(name, path::join(&current, name)));
                }
            },
        }
    }

    let nodes: Vec<Node> = folders
        .into_iter()
        .chain(
            files
                .into_iter()
                .filter(|(name, _)| !seen.contains(name))
                .map(|(name, entry)| Node::file(name, entry)),
        )
        .collect();
    tracing::Span::current().record("nodes", nodes.len());
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use time::macros::datetime;

    #[fixture]
    fn book() -> Vec<ListingEntry> {
        vec![
            ListingEntry::new("readme.txt", 10).with_last_modified(datetime!(2024-01-02 03:04:05 UTC)),
            ListingEntry::new("docs/intro.md", 5),
            ListingEntry::new("docs/ch1/page.md", 8),
        ]
    }

    #[rstest]
    fn test_root_projection(book: Vec<ListingEntry>) {
        let nodes = project(&book, "");
        assert_eq!(
            nodes,
            vec![
                Node::folder("docs", "docs"),
                Node::file("readme.txt", &book[0]),
            ]
        );
        assert_eq!(nodes[1].size(), Some(10));
        assert_eq!(nodes[1].last_modified(), Some(datetime!(2024-01-02 03:04:05 UTC)));
    }

    #[rstest]
    #[case("docs")]
    #[case("docs/")]
    #[case("/docs//")]
    fn test_nested_projection(book: Vec<ListingEntry>, #[case] current: &str) {
        let nodes = project(&book, current);
        assert_eq!(
            nodes,
            vec![
                Node::folder("ch1", "docs/ch1"),
                Node::file("intro.md", &book[1]),
            ]
        );
        assert_eq!(nodes[1].full_path, "docs/intro.md");
        assert_eq!(nodes[1].size(), Some(5));
    }

    #[rstest]
    fn test_deepest_level(book: Vec<ListingEntry>) {
        let nodes = project(&book, "docs/ch1");
        assert_eq!(nodes, vec![Node::file("page.md", &book[2])]);
    }

    #[test]
    fn test_folder_shadows_file() {
        let entries = [ListingEntry::new("a/x.txt", 1), ListingEntry::new("a", 2)];
        let nodes = project(&entries, "");
        assert_eq!(nodes, vec![Node::folder("a", "a")]);

        // Regardless of listing order
        let entries = [ListingEntry::new("a", 2), ListingEntry::new("a/x.txt", 1)];
        assert_eq!(project(&entries, ""), vec![Node::folder("a", "a")]);
    }

    #[rstest]
    #[case("")]
    #[case("docs")]
    #[case("nowhere/at/all")]
    fn test_empty_listing(#[case] current: &str) {
        assert!(project(&[], current).is_empty());
    }

    #[test]
    fn test_folders_collapse_in_discovery_order() {
        let entries = [
            ListingEntry::new("z/1", 1),
            ListingEntry::new("b.txt", 1),
            ListingEntry::new("a/1", 1),
            ListingEntry::new("z/2/deep", 1),
            ListingEntry::new("a.txt", 1),
            ListingEntry::new("a/2", 1),
        ];
        let names: Vec<_> = project(&entries, "").into_iter().map(|n| {
            let folder = n.is_folder();
            (n.name, folder)
        }).collect();
        assert_eq!(
            names,
            vec![
                ("z".to_string(), true),
                ("a".to_string(), true),
                ("b.txt".to_string(), false),
                ("a.txt".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_placeholder_and_foreign_keys_skipped() {
        let entries = [
            ListingEntry::new("docs/", 0),
            ListingEntry::new("docs/a.md", 1),
            ListingEntry::new("docsearch.md", 1),
            ListingEntry::new("other/b.md", 1),
        ];
        let nodes = project(&entries, "docs");
        assert_eq!(nodes, vec![Node::file("a.md", &entries[1])]);
    }

    #[test]
    fn test_trailing_slash_key_is_folder() {
        // A placeholder for a sub-folder still yields that folder.
        let entries = [ListingEntry::new("docs/empty/", 0)];
        assert_eq!(project(&entries, "docs"), vec![Node::folder("empty", "docs/empty")]);
    }

    #[test]
    fn test_empty_segments_never_name_a_node() {
        let entries = [
            ListingEntry::new("/rooted.txt", 1),
            ListingEntry::new("a//b.txt", 1),
            ListingEntry::new("a/c.txt", 1),
        ];
        assert_eq!(project(&entries, ""), vec![Node::folder("a", "a")]);
        assert_eq!(project(&entries, "a"), vec![Node::file("c.txt", &entries[2])]);
    }

    #[rstest]
    #[case("")]
    #[case("a")]
    #[case("a/b")]
    #[case("a//b/")]
    fn test_names_never_contain_slash(#[case] current: &str) {
        let entries = [
            ListingEntry::new("a", 1),
            ListingEntry::new("a/b", 1),
            ListingEntry::new("a/b/c/d/e", 1),
            ListingEntry::new("a//b/c", 1),
            ListingEntry::new("a/b/", 1),
            ListingEntry::new("/x/y", 1),
            ListingEntry::new("", 1),
        ];
        let nodes = project(&entries, current);
        assert!(nodes.iter().all(|n| !n.name.contains('/') && !n.name.is_empty()));
        let mut names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), nodes.len(), "names are unique");
    }

    #[rstest]
    fn test_idempotent(book: Vec<ListingEntry>) {
        assert_eq!(project(&book, "docs"), project(&book, "docs"));
        assert_eq!(project(&book, ""), project(&book, ""));
    }
}
