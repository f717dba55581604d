//! Core domain entities.
//!
//! - [`Link`] - A stored short code to target URL mapping
//! - [`NewLink`] - Input for creating a link
//! - [`ClickedLink`] - Outcome of a recorded redirect

pub mod link;

pub use link::{ClickedLink, Link, NewLink};
