/*============================================================
  Synavera Project: Syn-Ver
  Module: synver_core::snapshot
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Assemble and persist the environment snapshot document the
    host-integration layer renders.

  Security / Safety Notes:
    Snapshot data is written to operator-controlled paths; no
    privileged operations are performed.

  Dependencies:
    serde for JSON serialization.

  Operational Scope:
    Consumed by the editor host-integration layer to populate
    its version views and panels.

  Revision History:
    2025-03-18 COD  Authored snapshot builder.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Deterministic document shape for reproducible rendering
    - Explicit switch-outcome attribution
    - Rich metadata for audit and observability
============================================================*/

use std::fs::File;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{Result, SynverError};
use crate::version_info::{RuntimeCatalog, VersionRecord};

/// Wrapper representing the full snapshot document.
#[derive(Debug, Serialize)]
pub struct SnapshotDocument {
    pub metadata: SnapshotMetadata,
    pub versions: VersionRecord,
    pub runtime: RuntimeCatalog,
}

/// Metadata block describing snapshot context.
#[derive(Debug, Serialize)]
pub struct SnapshotMetadata {
    pub generated_at: String,
    pub generated_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch: Option<SwitchSummary>,
}

/// Outcome of a switch requested in this session, if any.
#[derive(Debug, Serialize)]
pub struct SwitchSummary {
    pub requested: String,
    pub succeeded: bool,
}

/// Build a snapshot from the fetched state and optional switch outcome.
pub fn build_snapshot(
    versions: VersionRecord,
    runtime: RuntimeCatalog,
    switch: Option<SwitchSummary>,
) -> SnapshotDocument {
    SnapshotDocument {
        metadata: SnapshotMetadata {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            generated_by: "synver_core".to_string(),
            switch,
        },
        versions,
        runtime,
    }
}

/// Persist the snapshot to the given path.
pub fn write_snapshot(document: &SnapshotDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            SynverError::Filesystem(format!(
                "Failed to create snapshot directory {}: {err}",
                parent.display()
            ))
        })?;
    }
    let file = File::create(path).map_err(|err| {
        SynverError::Filesystem(format!(
            "Failed to create snapshot file {}: {err}",
            path.display()
        ))
    })?;
    serde_json::to_writer_pretty(file, document).map_err(|err| {
        SynverError::Filesystem(format!(
            "Failed to write snapshot {}: {err}",
            path.display()
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version_info::UNKNOWN;

    #[test]
    fn document_round_trips_through_json() {
        let versions = VersionRecord {
            editor: "1.92.0".to_string(),
            node: "v18.20.0".to_string(),
            git: "2.44.0".to_string(),
            npm: "10.5.0".to_string(),
            os: "Arch Linux".to_string(),
        };
        let runtime = RuntimeCatalog {
            current: "18.20.0".to_string(),
            available: vec!["21.0.0".to_string()],
            installed: vec!["18.20.0".to_string()],
        };
        let document = build_snapshot(
            versions,
            runtime,
            Some(SwitchSummary {
                requested: "18.20.0".to_string(),
                succeeded: true,
            }),
        );

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&document).unwrap()).unwrap();
        assert_eq!(json["versions"]["node"], "v18.20.0");
        assert_eq!(json["runtime"]["current"], "18.20.0");
        assert_eq!(json["metadata"]["generated_by"], "synver_core");
        assert_eq!(json["metadata"]["switch"]["succeeded"], true);
    }

    #[test]
    fn switch_block_is_omitted_when_absent() {
        let document = build_snapshot(VersionRecord::default(), RuntimeCatalog::default(), None);
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&document).unwrap()).unwrap();
        assert!(json["metadata"].get("switch").is_none());
        assert_eq!(json["versions"]["editor"], UNKNOWN);
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/snapshot.json");
        let document = build_snapshot(VersionRecord::default(), RuntimeCatalog::default(), None);

        write_snapshot(&document, &path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"generated_by\": \"synver_core\""));
    }
}
