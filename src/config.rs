//! Command line surface and the validated run configuration.

use crate::error::{Error, Result};
use crate::labels::FilterPolicy;
use crate::logging::{LoggerConfig, LoggerFormat};
use crate::patch::PatchMode;
use crate::store::EntityRef;
use clap::{Parser, ValueEnum};

/// Format a dry run prints the patch document in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Copy a filtered subset of a node's labels onto a pod.
#[derive(Debug, Clone, Parser)]
#[command(name = "node-label-copier", version, about)]
pub struct Cli {
    /// Node to read labels from.
    #[arg(long, env = "NODE_NAME")]
    pub node_name: Option<String>,

    /// Pod to write labels to.
    #[arg(long, env = "POD_NAME")]
    pub pod_name: Option<String>,

    /// Namespace of the pod.
    #[arg(long, env = "POD_NAMESPACE")]
    pub namespace: Option<String>,

    /// Do not copy this label. Repeatable.
    #[arg(long = "exclude-label", value_name = "KEY")]
    pub exclude_labels: Vec<String>,

    /// Copy only this label. Repeatable; takes precedence over --exclude-label.
    #[arg(long = "include-label", value_name = "KEY")]
    pub include_labels: Vec<String>,

    /// Labels carried by the patch.
    #[arg(long, value_enum, default_value_t = PatchMode::Full)]
    pub patch_mode: PatchMode,

    /// Print the patch instead of applying it.
    #[arg(long)]
    pub dry_run: bool,

    /// Format of the printed patch.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LoggerFormat::Text)]
    pub log_format: LoggerFormat,

    /// Log filter, e.g. `debug`. Defaults to RUST_LOG, then `info`.
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Config is everything a run needs, resolved once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub node: EntityRef,
    pub pod: EntityRef,
    pub policy: FilterPolicy,
    pub mode: PatchMode,
    pub dry_run: bool,
    pub output: OutputFormat,
}

impl Cli {
    /// Returns the logger settings.
    pub fn logger(&self) -> LoggerConfig {
        LoggerConfig {
            format: self.log_format,
            level: self.log_level.clone(),
        }
    }

    /// Validates the options into a [`Config`].
    pub fn into_config(self) -> Result<Config> {
        let node = required(self.node_name, "--node-name")?;
        let pod = required(self.pod_name, "--pod-name")?;
        let namespace = required(self.namespace, "--namespace")?;

        Ok(Config {
            node: EntityRef::node(node),
            pod: EntityRef::pod(namespace, pod),
            policy: FilterPolicy::from_lists(self.exclude_labels, self.include_labels),
            mode: self.patch_mode,
            dry_run: self.dry_run,
            output: self.output,
        })
    }
}

fn required(value: Option<String>, flag: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Configuration(format!("missing required option {}", flag))),
    }
}
