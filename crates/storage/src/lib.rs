pub mod backend;
pub mod error;

pub use crate::backend::{EntryStream, ListingBackend, Pagination};
pub use blobnav_listing::ListingEntry;
use std::sync::Arc;

pub type BackendHandle = Arc<dyn ListingBackend + Send + Sync>;
