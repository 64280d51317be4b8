//! Patch module - The partial update sent to the target pod.
//!
//! This module turns a computed label set into a merge-patch document.

mod document;
mod mode;

pub use document::*;
pub use mode::*;
