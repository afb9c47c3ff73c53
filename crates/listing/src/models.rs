//! Listing models.
//!
//! [`ListingEntry`] is what a listing source hands us, one per physical
//! object. [`Node`] is what the projector hands back, one per direct child
//! of the browsed path.

use time::OffsetDateTime;

/// Metadata for a single object in the container, as returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Full slash-delimited key from the container root
    pub key: String,
    /// Object size in bytes
    pub size: u64,
    /// Last modified timestamp, if the listing reported one
    pub last_modified: Option<OffsetDateTime>,
}
impl ListingEntry {
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified: None,
        }
    }

    pub fn with_last_modified(mut self, modified: OffsetDateTime) -> Self {
        self.last_modified = Some(modified);
        self
    }
}

/// Whether a [`Node`] is a synthetic folder or a real object.
///
/// Only files carry a size and a modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File {
        size: u64,
        last_modified: Option<OffsetDateTime>,
    },
}

/// A direct child of the browsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Single path segment; never contains `/`
    pub name: String,
    /// Path from the container root. For files this is the object key.
    pub full_path: String,
    pub kind: NodeKind,
}
impl Node {
    pub fn folder(name: impl Into<String>, full_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            kind: NodeKind::Folder,
        }
    }

    pub fn file(name: impl Into<String>, entry: &ListingEntry) -> Self {
        Self {
            name: name.into(),
            full_path: entry.key.clone(),
            kind: NodeKind::File {
                size: entry.size,
                last_modified: entry.last_modified,
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder)
    }

    pub fn size(&self) -> Option<u64> {
        match self.kind {
            NodeKind::File { size, .. } => Some(size),
            NodeKind::Folder => None,
        }
    }

    pub fn last_modified(&self) -> Option<OffsetDateTime> {
        match self.kind {
            NodeKind::File { last_modified, .. } => last_modified,
            NodeKind::Folder => None,
        }
    }
}

/// One step of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    /// Canonical path this crumb navigates to; empty for the container root
    pub path: String,
}
impl Breadcrumb {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_folder_has_no_file_metadata() {
        let node = Node::folder("docs", "docs");
        assert!(node.is_folder());
        assert_eq!(node.size(), None);
        assert_eq!(node.last_modified(), None);
    }

    #[test]
    fn test_file_copies_entry_metadata() {
        let modified = datetime!(2024-03-01 12:00 UTC);
        let entry = ListingEntry::new("docs/intro.md", 5).with_last_modified(modified);
        let node = Node::file("intro.md", &entry);
        assert!(!node.is_folder());
        assert_eq!(node.full_path, "docs/intro.md");
        assert_eq!(node.size(), Some(5));
        assert_eq!(node.last_modified(), Some(modified));
    }
}
