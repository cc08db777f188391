/*============================================================
  Synavera Project: Syn-Ver
  Module: synver_core::switcher
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Orchestrate runtime version switches through the switch
    script, refreshing version state after a successful run.

  Security / Safety Notes:
    Only versions present in the most recently fetched catalog
    are forwarded to the script, and the target version is
    passed as a discrete argv element.

  Dependencies:
    scripts::ScriptRunner for execution, aggregator for the
    post-switch refresh.

  Operational Scope:
    Invoked once per `--switch` request by the binary entry
    point; owns no state between invocations.

  Revision History:
    2025-03-18 COD  Authored switch orchestration layer.
    2025-04-02 COD  Added single-flight guard for overlap.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Allow-list validation before any subprocess
    - Best-effort switching with no partial rollback
    - Single outstanding switch per orchestrator
============================================================*/

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::aggregator::VersionAggregator;
use crate::config::SynverConfig;
use crate::logger::Logger;
use crate::scripts::ScriptRunner;
use crate::version_info::{RuntimeCatalog, VersionRecord};

/// Version state re-fetched after a successful switch.
#[derive(Debug)]
pub struct RefreshedState {
    pub versions: VersionRecord,
    pub runtime: RuntimeCatalog,
}

/// Drives the switch script and the follow-up refresh.
///
/// The switch is best-effort: a script that fails after partially
/// mutating shell state is not rolled back. Failure reporting is
/// soft — the caller gets `None` and previously fetched state stays
/// valid.
pub struct SwitchOrchestrator {
    runner: ScriptRunner,
    switch_script: PathBuf,
    in_flight: AtomicBool,
}

impl SwitchOrchestrator {
    pub fn new(config: &SynverConfig) -> Self {
        Self {
            runner: ScriptRunner::new(&config.scripts.interpreter),
            switch_script: config.switch_script(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Switch the active runtime to `version`.
    ///
    /// Rejects versions absent from `catalog` and overlapping calls
    /// against the same orchestrator. On script success, performs
    /// exactly one aggregator re-fetch and returns the refreshed
    /// state; on any failure, logs and returns `None`.
    pub async fn switch_to(
        &self,
        version: &str,
        catalog: &RuntimeCatalog,
        aggregator: &VersionAggregator,
        logger: &Logger,
    ) -> Option<RefreshedState> {
        if !catalog.contains(version) {
            logger.warn(
                "SWITCH",
                format!("Version `{version}` is not in the fetched catalog; refusing to switch"),
            );
            return None;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            logger.warn(
                "SWITCH",
                format!("A switch is already in flight; rejecting `{version}`"),
            );
            return None;
        }
        let _guard = InFlightReset(&self.in_flight);

        logger.info("SWITCH", format!("Switching runtime to `{version}`"));
        if let Err(err) = self.runner.run_with_arg(&self.switch_script, version).await {
            logger.warn("SWITCH", format!("Switch to `{version}` failed: {err}"));
            return None;
        }

        let versions = aggregator.fetch(logger).await;
        let runtime = aggregator.fetch_catalog(logger).await;
        logger.info("SWITCH", format!("Runtime switched to `{version}`"));

        Some(RefreshedState { versions, runtime })
    }
}

struct InFlightReset<'a>(&'a AtomicBool);

impl Drop for InFlightReset<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
