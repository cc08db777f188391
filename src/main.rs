/*============================================================
  Synavera Project: Syn-Ver
  Module: synver_core::main
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Entry point for Syn-Ver Core. Queries the collaborator
    scripts for tool and runtime versions, optionally switches
    the active runtime, and emits a snapshot document for the
    editor host-integration layer.

  Security / Safety Notes:
    Operates within user privileges. Executes operator-owned
    shell scripts only; no network access is performed.

  Dependencies:
    clap for CLI parsing, chrono for timestamps.

  Operational Scope:
    Invoked by the editor host-integration layer on refresh and
    switch requests, or by operators directly.

  Revision History:
    2025-03-18 COD  Authored Syn-Ver Core runtime.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Result-first error handling with deterministic exits
    - Structured logging following Synavera cadence
    - Configurable execution via CLI and config file
============================================================*/

mod aggregator;
mod config;
mod error;
mod future;
mod logger;
mod scripts;
mod snapshot;
mod switcher;
mod version_info;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{ArgAction, Parser};

use aggregator::VersionAggregator;
use config::SynverConfig;
use error::{Result, SynverError};
use logger::Logger;
use snapshot::{build_snapshot, write_snapshot, SnapshotDocument, SwitchSummary};
use switcher::SwitchOrchestrator;
use version_info::RuntimeCatalog;

/// Command-line arguments for Syn-Ver-Core.
#[derive(Debug, Parser)]
#[command(
    name = "Syn-Ver-Core",
    version,
    author = "Synavera Systems",
    about = "Environment version snapshot builder for Syn-Ver"
)]
struct Cli {
    /// Override configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override snapshot output path.
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,
    /// Explicit log file path.
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
    /// Switch the active runtime to this version before snapshotting.
    #[arg(long, value_name = "VERSION")]
    switch: Option<String>,
    /// Skip the runtime catalog query.
    #[arg(long, action = ArgAction::SetTrue)]
    no_catalog: bool,
    /// Host editor version, supplied by the integration layer.
    #[arg(long, value_name = "VERSION")]
    editor_version: Option<String>,
    /// Do not write a snapshot; emit summary only.
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,
    /// Enable verbose logging to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[Syn-Ver-Core] {}", err);
            err.exit_code()
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.no_catalog && cli.switch.is_some() {
        return Err(SynverError::Config(
            "Cannot switch runtimes without the runtime catalog".into(),
        ));
    }

    let config_path = cli.config.as_deref();
    let config = SynverConfig::load_from_optional_path(config_path)?;

    let snapshot_path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| config.snapshot_path());

    let session_stamp = Utc::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let log_path = cli
        .log
        .clone()
        .or_else(|| Some(config.log_dir().join(format!("core_{session_stamp}.log"))));
    let logger = Logger::new(log_path, cli.verbose)?;
    logger.info("INIT", "Syn-Ver Core awakening.");

    let aggregator = VersionAggregator::new(&config, cli.editor_version.clone());
    let mut versions = aggregator.fetch(&logger).await;
    logger.info(
        "VERSIONS",
        format!(
            "editor={} node={} git={} npm={}",
            versions.editor, versions.node, versions.git, versions.npm
        ),
    );

    let mut runtime = if cli.no_catalog {
        RuntimeCatalog::default()
    } else {
        aggregator.fetch_catalog(&logger).await
    };
    logger.info(
        "CATALOG",
        format!(
            "current={} available={} installed={}",
            runtime.current,
            runtime.available.len(),
            runtime.installed.len()
        ),
    );

    let mut switch_summary: Option<SwitchSummary> = None;
    if let Some(version) = &cli.switch {
        let orchestrator = SwitchOrchestrator::new(&config);
        match orchestrator
            .switch_to(version, &runtime, &aggregator, &logger)
            .await
        {
            Some(refreshed) => {
                versions = refreshed.versions;
                runtime = refreshed.runtime;
                switch_summary = Some(SwitchSummary {
                    requested: version.clone(),
                    succeeded: true,
                });
            }
            // Previously fetched state stays in the snapshot untouched.
            None => {
                switch_summary = Some(SwitchSummary {
                    requested: version.clone(),
                    succeeded: false,
                });
            }
        }
    }

    let switch_failed = matches!(&switch_summary, Some(summary) if !summary.succeeded);
    let document = build_snapshot(versions, runtime, switch_summary);

    if cli.dry_run {
        print_summary(&document);
    } else {
        write_snapshot(&document, &snapshot_path)?;
        logger.info(
            "SNAPSHOT",
            format!("Snapshot written to {}", snapshot_path.display()),
        );
    }

    logger.info("COMPLETE", "Environment snapshot synchronised.");
    logger.finalize()?;

    if switch_failed {
        return Err(SynverError::Switch {
            version: cli.switch.unwrap_or_default(),
        });
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(document: &SnapshotDocument) {
    println!(
        "→ Snapshot dry-run. node={} git={} npm={} runtime={} (available={} installed={})",
        document.versions.node,
        document.versions.git,
        document.versions.npm,
        document.runtime.current,
        document.runtime.available.len(),
        document.runtime.installed.len()
    );
}
