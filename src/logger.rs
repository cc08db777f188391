/*============================================================
  Synavera Project: Syn-Ver
  Module: synver_core::logger
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1
  ------------------------------------------------------------
  Purpose:
    Provide structured, append-only logging utilities for
    Syn-Ver-Core operations.

  Security / Safety Notes:
    Log entries carry event codes and operator-visible paths
    only; script stdout is never mirrored into the log.

  Dependencies:
    std::fs::File, std::sync::Mutex, sha2 for integrity hashing.

  Operational Scope:
    Used by runtime components to emit RFC-3339 UTC stamped
    log entries and produce session hash digests.

  Revision History:
    2025-03-18 COD  Established logging module for Syn-Ver-Core.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Append-only logging with UTC timestamps
    - Deterministic formatting for auditability
    - Graceful error propagation on I/O failures
============================================================*/

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::error::{Result, SynverError};

/// Structured log level for Syn-Ver-Core events.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }

    fn echo_to_stderr(self, verbose: bool) -> bool {
        verbose || matches!(self, LogLevel::Warn | LogLevel::Error)
    }
}

/// Shared logger that emits append-only entries in Synavera format.
pub struct Logger {
    sink: Option<Mutex<BufWriter<File>>>,
    log_path: Option<PathBuf>,
    verbose: bool,
}

impl Logger {
    /// Build a logger that writes to stderr and optionally to a file.
    pub fn new(log_path: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let sink = match log_path.as_deref() {
            Some(file_path) => Some(Mutex::new(BufWriter::new(open_log_file(file_path)?))),
            None => None,
        };

        Ok(Self {
            sink,
            log_path,
            verbose,
        })
    }

    /// Emit a log entry with the given level, code, and message.
    pub fn log<S: AsRef<str>>(&self, level: LogLevel, code: &str, message: S) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let payload = format!(
            "{timestamp} [{}] [{}] {}",
            level.as_str(),
            code,
            message.as_ref()
        );

        if level.echo_to_stderr(self.verbose) {
            eprintln!("{payload}");
        }

        if let Some(sink) = &self.sink {
            if let Ok(mut guard) = sink.lock() {
                let wrote = writeln!(guard, "{payload}").and_then(|()| guard.flush());
                if wrote.is_err() {
                    eprintln!("{timestamp} [ERROR] [LOGGER] Failed to persist log entry");
                }
            }
        }
    }

    /// Convenience wrapper for `INFO` level events.
    pub fn info<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Info, code, message);
    }

    /// Convenience wrapper for `WARN` level events.
    pub fn warn<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Warn, code, message);
    }

    /// Convenience wrapper for `ERROR` level events.
    #[allow(dead_code)]
    pub fn error<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Error, code, message);
    }

    /// Convenience wrapper for `DEBUG` level events.
    pub fn debug<S: AsRef<str>>(&self, code: &str, message: S) {
        self.log(LogLevel::Debug, code, message);
    }

    /// Return the path backing this logger, if any.
    pub fn path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Compute and persist SHA-256 digest of the log file.
    pub fn finalize(&self) -> Result<()> {
        let Some(path) = self.path() else {
            return Ok(());
        };

        let data = std::fs::read(path).map_err(|err| {
            SynverError::Filesystem(format!(
                "Failed to read log for hashing {}: {err}",
                path.display()
            ))
        })?;
        let digest = Sha256::digest(&data);

        let mut hash_os = path.as_os_str().to_os_string();
        hash_os.push(".hash");
        let hash_path = PathBuf::from(hash_os);
        let mut file = File::create(&hash_path).map_err(|err| {
            SynverError::Filesystem(format!(
                "Failed to create hash file {}: {err}",
                hash_path.display()
            ))
        })?;
        writeln!(
            file,
            "{:x}  {}",
            digest,
            path.file_name().unwrap_or_default().to_string_lossy()
        )
        .map_err(|err| {
            SynverError::Filesystem(format!(
                "Failed to write hash file {}: {err}",
                hash_path.display()
            ))
        })?;
        Ok(())
    }
}

fn open_log_file(file_path: &Path) -> Result<File> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            SynverError::Filesystem(format!(
                "Failed to create log directory {}: {err}",
                parent.display()
            ))
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)
        .map_err(|err| {
            SynverError::Filesystem(format!(
                "Failed to open log file {}: {err}",
                file_path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_appends_and_finalize_writes_digest() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("session.log");

        let logger = Logger::new(Some(log_path.clone()), false).unwrap();
        logger.info("TEST", "first entry");
        logger.warn("TEST", "second entry");
        logger.finalize().unwrap();

        let contents = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("[INFO] [TEST] first entry"));
        assert!(contents.contains("[WARN] [TEST] second entry"));

        let hash_path = dir.path().join("session.log.hash");
        let hash = std::fs::read_to_string(hash_path).unwrap();
        assert!(hash.trim().ends_with("session.log"));
    }

    #[test]
    fn pathless_logger_finalizes_cleanly() {
        let logger = Logger::new(None, true).unwrap();
        logger.debug("TEST", "stderr only");
        assert!(logger.finalize().is_ok());
    }
}
