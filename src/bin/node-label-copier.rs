//! node-label-copier - copy node labels onto a pod.
//!
//! Meant to run once per pod, typically as an init container with the
//! node and pod identity injected through the downward API.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use node_label_copier::logging::init_logger;
use node_label_copier::{run, Cli, KubeStore, OutputFormat, PatchDocument, Result};
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logger(&cli.logger()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: cannot start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(copy(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "label copy failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn copy(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    let store = KubeStore::connect().await?;
    let outcome = run(&config, &store).await?;

    if config.dry_run {
        print(&outcome.document, config.output)?;
    }
    Ok(())
}

fn print(document: &PatchDocument, format: OutputFormat) -> Result<()> {
    let text = match format {
        OutputFormat::Json => document.to_json()? + "\n",
        OutputFormat::Yaml => document.to_yaml()?,
    };
    io::stdout().write_all(text.as_bytes())?;
    Ok(())
}
