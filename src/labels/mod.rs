//! Labels module - Label sets and the filters that narrow them.
//!
//! This module provides the pure selection step of the copy: a node's
//! [`LabelSet`] goes in, a [`FilterPolicy`] decides which keys survive.

mod filter;
mod set;

pub use filter::*;
pub use set::*;
