//! Browse a flat, prefix-addressed blob container as a folder tree.
//!
//! Nothing in a container is a folder: there are only objects with
//! `/`-delimited keys. This crate holds the pure side of browsing one:
//!
//! - [`resolve`] turns an endpoint URL into a [`ContainerAddress`] and the
//!   path to start at,
//! - [`project`] collapses a flat listing into the direct children of a path,
//! - [`build_trail`] derives the breadcrumb trail for a path.
//!
//! Fetching listings and drawing them are somebody else's problem (see the
//! `blobnav-storage` and `blobnav-browser` crates).

mod address;
pub mod error;
mod models;
pub mod path;
mod project;
mod trail;

pub use crate::address::{ContainerAddress, Resolved, resolve};
pub use crate::models::{Breadcrumb, ListingEntry, Node, NodeKind};
pub use crate::project::project;
pub use crate::trail::build_trail;
