/*============================================================
  Synavera Project: Syn-Ver
  Module: synver_core::scripts
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Execute the collaborator shell scripts that query tool
    versions, enumerate runtime versions, and switch the
    active runtime.

  Security / Safety Notes:
    Scripts run with user privileges only. The switch target
    is passed as a discrete argv element; no value is ever
    spliced into a shell command line.

  Dependencies:
    tokio::process for async command execution.

  Operational Scope:
    Supplies the aggregator and switch orchestrator with raw
    script output and exit outcomes.

  Revision History:
    2025-03-18 COD  Crafted script execution layer.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Deterministic command invocation with explicit checks
    - Structured parsing with clear failure modes
    - Reusable helpers for external command diagnostics
============================================================*/

use std::io;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::{Result, SynverError};

/// Runs collaborator scripts through a configured interpreter.
pub struct ScriptRunner {
    interpreter: String,
}

impl ScriptRunner {
    pub fn new(interpreter: &str) -> Self {
        Self {
            interpreter: interpreter.to_string(),
        }
    }

    /// Run `script` with no arguments and capture its stdout.
    ///
    /// Fails on spawn error, non-zero exit, or non-UTF-8 output; the
    /// caller decides whether that failure is soft.
    pub async fn capture(&self, script: &Path) -> Result<String> {
        let output = self.spawn(script, None).await?;
        String::from_utf8(output).map_err(|err| {
            SynverError::Parse(format!(
                "Script {} emitted invalid UTF-8: {err}",
                script.display()
            ))
        })
    }

    /// Run `script` with a single positional argument, discarding stdout.
    /// Only the exit outcome matters to the caller.
    pub async fn run_with_arg(&self, script: &Path, arg: &str) -> Result<()> {
        self.spawn(script, Some(arg)).await?;
        Ok(())
    }

    async fn spawn(&self, script: &Path, arg: Option<&str>) -> Result<Vec<u8>> {
        if !script.is_file() {
            return Err(SynverError::ScriptMissing {
                script: script.display().to_string(),
            });
        }

        let mut command = Command::new(&self.interpreter);
        command.arg(script);
        if let Some(arg) = arg {
            command.arg(arg);
        }

        let output = command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| map_spawn_error(err, &self.interpreter))?;

        if !output.status.success() {
            return Err(SynverError::CommandFailure {
                command: describe(script, arg),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

fn describe(script: &Path, arg: Option<&str>) -> String {
    match arg {
        Some(arg) => format!("{} {arg}", script.display()),
        None => script.display().to_string(),
    }
}

fn map_spawn_error(err: io::Error, command: &str) -> SynverError {
    if err.kind() == io::ErrorKind::NotFound {
        SynverError::CommandMissing {
            command: command.into(),
        }
    } else {
        SynverError::Runtime(format!("Failed to spawn {command}: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script_in(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn capture_returns_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let script = script_in(dir.path(), "ok.sh", "echo \"NODE: v18.20.0\"\n");

        let runner = ScriptRunner::new("bash");
        let out = runner.capture(&script).await.unwrap();
        assert_eq!(out, "NODE: v18.20.0\n");
    }

    #[tokio::test]
    async fn missing_script_is_reported_before_spawn() {
        let runner = ScriptRunner::new("bash");
        let err = runner
            .capture(Path::new("/nonexistent/get-versions.sh"))
            .await
            .unwrap_err();
        assert!(matches!(err, SynverError::ScriptMissing { .. }));
    }

    #[tokio::test]
    async fn nonzero_exit_carries_status_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let script = script_in(dir.path(), "fail.sh", "echo boom >&2\nexit 3\n");

        let runner = ScriptRunner::new("bash");
        let err = runner.capture(&script).await.unwrap_err();
        match err {
            SynverError::CommandFailure { status, stderr, .. } => {
                assert_eq!(status, 3);
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn switch_argument_is_a_discrete_argv_element() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("arg.txt");
        let script = script_in(
            dir.path(),
            "switch.sh",
            &format!("printf '%s' \"$1\" > \"{}\"\n", marker.display()),
        );

        let runner = ScriptRunner::new("bash");
        // A shell-metacharacter payload must arrive verbatim, unexpanded.
        runner
            .run_with_arg(&script, "18.20.0; touch pwned")
            .await
            .unwrap();
        let recorded = std::fs::read_to_string(&marker).unwrap();
        assert_eq!(recorded, "18.20.0; touch pwned");
        assert!(!dir.path().join("pwned").exists());
    }

    #[tokio::test]
    async fn missing_interpreter_maps_to_command_missing() {
        let dir = tempfile::tempdir().unwrap();
        let script = script_in(dir.path(), "ok.sh", "exit 0\n");

        let runner = ScriptRunner::new("synver-no-such-interpreter");
        let err = runner.capture(&script).await.unwrap_err();
        assert!(matches!(err, SynverError::CommandMissing { .. }));
    }
}
