/*============================================================
  Synavera Project: Syn-Ver
  Module: synver_core::version_info
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Shared structures describing tool version snapshots and
    the runtime version catalog reported by the version
    manager scripts.

  Security / Safety Notes:
    Pure data containers; no I/O performed in this module.

  Dependencies:
    serde for snapshot serialization.

  Operational Scope:
    Passed between the aggregator, switch orchestrator, and
    snapshot builder.

  Revision History:
    2025-03-18 COD  Introduced shared version structures.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Clear data contracts between modules
    - Serializable structures for snapshot output
============================================================*/

use serde::Serialize;

/// Sentinel for fields no source has populated yet.
pub const UNKNOWN: &str = "unknown";
/// Sentinel for tools the query script reports with an empty value.
pub const NOT_INSTALLED: &str = "not installed";

/// Snapshot of editor/runtime/VCS/package-manager version strings.
///
/// Replaced wholesale on every fetch; fields hold [`UNKNOWN`] until a
/// source populates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    pub editor: String,
    pub node: String,
    pub git: String,
    pub npm: String,
    pub os: String,
}

impl Default for VersionRecord {
    fn default() -> Self {
        Self {
            editor: UNKNOWN.to_string(),
            node: UNKNOWN.to_string(),
            git: UNKNOWN.to_string(),
            npm: UNKNOWN.to_string(),
            os: UNKNOWN.to_string(),
        }
    }
}

/// Runtime versions as reported by the version manager script.
///
/// Lists preserve emission order; this layer neither sorts nor
/// deduplicates what the script reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeCatalog {
    pub current: String,
    pub available: Vec<String>,
    pub installed: Vec<String>,
}

impl Default for RuntimeCatalog {
    fn default() -> Self {
        Self {
            current: UNKNOWN.to_string(),
            available: Vec::new(),
            installed: Vec::new(),
        }
    }
}

impl RuntimeCatalog {
    /// Whether `version` appeared in the available or installed lists.
    /// The switch orchestrator only forwards versions that pass here.
    pub fn contains(&self, version: &str) -> bool {
        self.available.iter().any(|v| v == version)
            || self.installed.iter().any(|v| v == version)
    }
}
