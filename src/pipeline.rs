//! The copy run: fetch, select, build, apply.
//!
//! Every step waits on the one before it and the first error ends the
//! run. Nothing is written unless every earlier step succeeded.

use crate::config::Config;
use crate::error::Result;
use crate::labels::select;
use crate::patch::{PatchDocument, PatchMode};
use crate::store::EntityStore;
use std::fmt;
use tracing::{debug, info};

/// Stage is how far a run got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    SourceFetched,
    TargetComputed,
    PatchBuilt,
    Applied,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::SourceFetched => "source-fetched",
            Stage::TargetComputed => "target-computed",
            Stage::PatchBuilt => "patch-built",
            Stage::Applied => "applied",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// `Applied`, or `PatchBuilt` when nothing was sent.
    pub stage: Stage,
    pub document: PatchDocument,
}

/// Copies the node's labels onto the pod as described by `config`.
pub async fn run<S>(config: &Config, store: &S) -> Result<Outcome>
where
    S: EntityStore + ?Sized,
{
    let mut stage = Stage::Init;
    debug!(%stage, node = %config.node, pod = %config.pod, "starting");

    let node_labels = store.get(&config.node).await?;
    info!(node = %config.node, labels = %node_labels, "available node labels");
    stage = advance(stage, Stage::SourceFetched);

    let pod_labels = store.get(&config.pod).await?;
    info!(pod = %config.pod, labels = %pod_labels, "available pod labels");

    let target = select(&node_labels, &config.policy);
    debug!(mode = config.policy.mode(), selected = target.len(), of = node_labels.len(), "labels selected");
    stage = advance(stage, Stage::TargetComputed);

    let document = config.mode.document(&target, &pod_labels);
    info!(body = %document.to_json()?, "patch request body");
    stage = advance(stage, Stage::PatchBuilt);

    if config.dry_run {
        info!("dry run, patch not applied");
        return Ok(Outcome { stage, document });
    }
    if config.mode == PatchMode::Delta && document.labels().is_empty() {
        info!(pod = %config.pod, "pod labels already up to date");
        return Ok(Outcome { stage, document });
    }

    store.patch(&config.pod, &document).await?;
    stage = advance(stage, Stage::Applied);
    info!(pod = %config.pod, "successfully patched");

    Ok(Outcome { stage, document })
}

fn advance(from: Stage, to: Stage) -> Stage {
    debug!(%from, %to, "stage");
    to
}
