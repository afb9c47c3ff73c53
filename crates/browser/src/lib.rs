//! Navigation over a blob container presented as a folder tree.
//!
//! [`Navigator`] holds where the user is and drives each fetch, project and
//! render cycle; [`Renderer`] and [`FileOpener`] are the seams through which
//! results leave it.

pub mod error;
mod navigator;
mod render;

pub use crate::navigator::{Navigator, Outcome, StalePolicy};
pub use crate::render::{FileOpener, Renderer};
