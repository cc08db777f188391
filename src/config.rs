/*============================================================
  Synavera Project: Syn-Ver
  Module: synver_core::config
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Load and validate Syn-Ver-Core configuration, resolving
    collaborator script locations and output paths.

  Security / Safety Notes:
    Configuration is read from operator-controlled paths only;
    script locations are resolved, never executed, here.

  Dependencies:
    serde + toml for parsing, dirs for platform directories.

  Operational Scope:
    Consulted once at startup by the binary entry point; all
    downstream modules receive resolved paths.

  Revision History:
    2025-03-18 COD  Authored configuration layer.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit defaults with operator overrides
    - Fail-fast on malformed operator input
    - No hidden state beyond the documented config file
============================================================*/

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SynverError};

/// Top-level configuration for Syn-Ver-Core.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynverConfig {
    pub scripts: ScriptConfig,
    pub output: OutputConfig,
    pub editor: EditorConfig,
}

/// Locations and interpreter for the collaborator scripts.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptConfig {
    /// Interpreter used to run every script.
    pub interpreter: String,
    /// Directory holding the scripts; defaults to `<config>/synver/scripts`.
    pub dir: Option<PathBuf>,
    /// Script emitting `KEY: value` tool versions.
    pub version_query: String,
    /// Script emitting the CURRENT/AVAILABLE/INSTALLED catalog.
    pub runtime_catalog: String,
    /// Script switching the active runtime version.
    pub switch: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            interpreter: "bash".to_string(),
            dir: None,
            version_query: "get-versions.sh".to_string(),
            runtime_catalog: "get-runtime-versions.sh".to_string(),
            switch: "switch-runtime-version.sh".to_string(),
        }
    }
}

/// Snapshot and log destinations.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub snapshot_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

/// Host-editor details the scripts cannot observe.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub version: Option<String>,
}

impl SynverConfig {
    /// Load configuration from an explicit path, or fall back to the
    /// default location. An explicit path must exist and parse; the
    /// default location is optional.
    pub fn load_from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => Self::load_file(explicit),
            None => {
                let default_path = Self::base_dir().join("config.toml");
                if default_path.is_file() {
                    Self::load_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            SynverError::Filesystem(format!(
                "Failed to read config file {}: {err}",
                path.display()
            ))
        })?;
        toml::from_str(&raw).map_err(|err| {
            SynverError::Config(format!("Invalid config file {}: {err}", path.display()))
        })
    }

    fn base_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("synver")
    }

    /// Directory holding the collaborator scripts.
    pub fn script_dir(&self) -> PathBuf {
        self.scripts
            .dir
            .clone()
            .unwrap_or_else(|| Self::base_dir().join("scripts"))
    }

    /// Resolved path of the version query script.
    pub fn version_query_script(&self) -> PathBuf {
        self.script_dir().join(&self.scripts.version_query)
    }

    /// Resolved path of the runtime catalog script.
    pub fn runtime_catalog_script(&self) -> PathBuf {
        self.script_dir().join(&self.scripts.runtime_catalog)
    }

    /// Resolved path of the runtime switch script.
    pub fn switch_script(&self) -> PathBuf {
        self.script_dir().join(&self.scripts.switch)
    }

    /// Destination for the snapshot document.
    pub fn snapshot_path(&self) -> PathBuf {
        self.output
            .snapshot_path
            .clone()
            .unwrap_or_else(|| Self::base_dir().join("snapshot.json"))
    }

    /// Directory for session log files.
    pub fn log_dir(&self) -> PathBuf {
        self.output
            .log_dir
            .clone()
            .unwrap_or_else(|| Self::base_dir().join("logs"))
    }
}
