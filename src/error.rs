/*============================================================
  Synvera Project: Syn-Ver
  Module: synver_core::error
  Etiquette: Synvera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Centralise Syn-Ver-Core error types to provide consistent
    diagnostics and exit semantics.

  Security / Safety Notes:
    Error contexts expose script paths and exit codes only;
    no environment contents are echoed back.

  Dependencies:
    thiserror for ergonomic error definitions.

  Operational Scope:
    Used across modules to propagate recoverable failures and
    consolidate exit codes for the binary entry point.

  Revision History:
    2025-03-18 COD  Established shared error definitions.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit error taxonomy with actionable context
    - No silent failure paths
    - Stable exit codes for operational tooling
============================================================*/

use std::io;
use std::process::ExitCode;

use thiserror::Error;

/// Result alias for Syn-Ver-Core operations.
pub type Result<T> = std::result::Result<T, SynverError>;

/// Enumerates high-level error domains surfaced by Syn-Ver-Core.
#[derive(Debug, Error)]
pub enum SynverError {
    #[error("Required script `{script}` not found or not a file")]
    ScriptMissing { script: String },
    #[error("Required command `{command}` not found in PATH")]
    CommandMissing { command: String },
    #[error("Script `{command}` failed with status {status}: {stderr}")]
    CommandFailure {
        command: String,
        status: i32,
        stderr: String,
    },
    #[error("Switch to runtime version `{version}` did not complete")]
    Switch { version: String },
    #[error("Configuration: {0}")]
    Config(String),
    #[error("Parse: {0}")]
    Parse(String),
    #[error("Filesystem: {0}")]
    Filesystem(String),
    #[error("Runtime: {0}")]
    Runtime(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SynverError {
    /// Map error category to a deterministic exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SynverError::ScriptMissing { .. } => ExitCode::from(10),
            SynverError::CommandMissing { .. } => ExitCode::from(10),
            SynverError::CommandFailure { .. } => ExitCode::from(11),
            SynverError::Switch { .. } => ExitCode::from(12),
            SynverError::Config(_) => ExitCode::from(20),
            SynverError::Parse(_) => ExitCode::from(31),
            SynverError::Filesystem(_) => ExitCode::from(40),
            SynverError::Io(_) => ExitCode::from(41),
            SynverError::Runtime(_) => ExitCode::from(50),
        }
    }
}
