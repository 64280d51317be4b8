//! # Node Label Copier
//!
//! Copies a filtered subset of a Kubernetes node's labels onto a pod
//! scheduled on that node, using a merge patch.
//!
//! ## Modules
//!
//! - [`labels`] - Label sets and the allow/deny filter that narrows them
//! - [`patch`] - The merge-patch document built from the selected labels
//! - [`store`] - Reading and patching entities in the orchestration API
//! - [`config`] - Command line options and the validated run configuration
//! - [`pipeline`] - The fetch, select, build and apply sequence
//! - [`logging`] - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod labels;
pub mod logging;
pub mod patch;
pub mod pipeline;
pub mod store;


pub use config::{Cli, Config, OutputFormat};
pub use error::{Error, Result};
pub use labels::{select, FilterPolicy, LabelSet};
pub use patch::{build, PatchDocument, PatchMode};
pub use pipeline::{run, Outcome, Stage};
pub use store::{EntityRef, EntityStore, KubeStore, Kind, MemoryStore};
