/*============================================================
  Synavera Project: Syn-Ver
  Module: synver_core::aggregator
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Interface with the version query and runtime catalog
    scripts, parsing their line-oriented output into the
    shared version structures.

  Security / Safety Notes:
    Consumes script stdout only; malformed lines are dropped,
    never interpreted.

  Dependencies:
    scripts::ScriptRunner for execution.

  Operational Scope:
    Supplies the binary entry point and switch orchestrator
    with the current VersionRecord and RuntimeCatalog.

  Revision History:
    2025-03-18 COD  Authored version aggregation layer.
    2025-04-02 COD  Catalog parser: drop pre-section lines.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Soft failure with sentinel substitution
    - One-pass parsing with last-write-wins assignment
    - No trust in collaborator output ordering
============================================================*/

use std::path::PathBuf;

use crate::config::SynverConfig;
use crate::logger::Logger;
use crate::scripts::ScriptRunner;
use crate::version_info::{RuntimeCatalog, VersionRecord, NOT_INSTALLED, UNKNOWN};

/// Fetches and parses tool version and runtime catalog data.
///
/// Both fetch operations fail soft: any script or decode error is
/// logged and the caller receives sentinel-filled defaults. Errors
/// never cross this boundary.
pub struct VersionAggregator {
    runner: ScriptRunner,
    version_script: PathBuf,
    catalog_script: PathBuf,
    editor_version: Option<String>,
}

impl VersionAggregator {
    /// Build an aggregator from resolved configuration. A CLI-supplied
    /// editor version takes precedence over the configured one.
    pub fn new(config: &SynverConfig, editor_override: Option<String>) -> Self {
        Self {
            runner: ScriptRunner::new(&config.scripts.interpreter),
            version_script: config.version_query_script(),
            catalog_script: config.runtime_catalog_script(),
            editor_version: editor_override.or_else(|| config.editor.version.clone()),
        }
    }

    /// Fetch a fresh [`VersionRecord`]. Fields the script does not
    /// report keep their sentinel; the editor field comes from the
    /// host, not the script.
    pub async fn fetch(&self, logger: &Logger) -> VersionRecord {
        let mut record = VersionRecord::default();
        if let Some(editor) = &self.editor_version {
            record.editor = editor.clone();
        }

        match self.runner.capture(&self.version_script).await {
            Ok(stdout) => {
                apply_version_output(&mut record, &stdout);
                logger.debug(
                    "VERSIONS",
                    format!(
                        "node={} git={} npm={} os={}",
                        record.node, record.git, record.npm, record.os
                    ),
                );
            }
            Err(err) => logger.warn("VERSIONS", format!("Version query failed: {err}")),
        }

        record
    }

    /// Fetch a fresh [`RuntimeCatalog`]. On any failure the catalog is
    /// empty with current = "unknown".
    pub async fn fetch_catalog(&self, logger: &Logger) -> RuntimeCatalog {
        match self.runner.capture(&self.catalog_script).await {
            Ok(stdout) => parse_catalog_output(&stdout),
            Err(err) => {
                logger.warn("CATALOG", format!("Runtime catalog query failed: {err}"));
                RuntimeCatalog::default()
            }
        }
    }
}

/// Assign recognised `KEY: value` lines onto the record.
///
/// Keys match case-sensitively; the split happens at the first colon
/// only, so values may themselves contain colons. Unrecognised keys
/// are ignored and duplicate keys resolve last-write-wins.
pub(crate) fn apply_version_output(record: &mut VersionRecord, output: &str) {
    for line in output.lines() {
        let Some((raw_key, raw_value)) = line.split_once(':') else {
            continue;
        };
        let value = raw_value.trim();
        match raw_key.trim() {
            "NODE" => record.node = value_or(value, NOT_INSTALLED),
            "GIT" => record.git = value_or(value, NOT_INSTALLED),
            "NPM" => record.npm = value_or(value, NOT_INSTALLED),
            "OS" => record.os = value_or(value, UNKNOWN),
            _ => {}
        }
    }
}

fn value_or(value: &str, sentinel: &str) -> String {
    if value.is_empty() {
        sentinel.to_string()
    } else {
        value.to_string()
    }
}

/// Parse the catalog script's sectioned output.
///
/// `CURRENT:` sets the active version wherever it appears. `AVAILABLE:`
/// and `INSTALLED:` headers move the section cursor; subsequent bare
/// lines append to that section in emission order. Lines arriving
/// before any header are dropped.
pub(crate) fn parse_catalog_output(output: &str) -> RuntimeCatalog {
    enum Section {
        Available,
        Installed,
    }

    let mut catalog = RuntimeCatalog::default();
    let mut section: Option<Section> = None;

    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("CURRENT:") {
            catalog.current = rest.trim().to_string();
        } else if line.starts_with("AVAILABLE:") {
            section = Some(Section::Available);
        } else if line.starts_with("INSTALLED:") {
            section = Some(Section::Installed);
        } else {
            match section {
                Some(Section::Available) => catalog.available.push(trimmed.to_string()),
                Some(Section::Installed) => catalog.installed.push(trimmed.to_string()),
                None => {}
            }
        }
    }

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_record(output: &str) -> VersionRecord {
        let mut record = VersionRecord::default();
        apply_version_output(&mut record, output);
        record
    }

    #[test]
    fn well_formed_block_populates_matching_fields() {
        let record = parse_record(
            "NODE: v18.20.0\nGIT:  git version 2.44.0 \nNPM: 10.5.0\nOS: Ubuntu 24.04 LTS\n",
        );
        assert_eq!(record.node, "v18.20.0");
        assert_eq!(record.git, "git version 2.44.0");
        assert_eq!(record.npm, "10.5.0");
        assert_eq!(record.os, "Ubuntu 24.04 LTS");
        assert_eq!(record.editor, UNKNOWN);
    }

    #[test]
    fn unrecognised_keys_leave_the_record_untouched() {
        let record = parse_record("YARN: 1.22.22\nnode: v20.0.0\nNODE: v18.20.0\n");
        assert_eq!(record.node, "v18.20.0");
        assert_eq!(record.git, UNKNOWN);
        assert_eq!(record.npm, UNKNOWN);
    }

    #[test]
    fn empty_output_keeps_every_sentinel() {
        assert_eq!(parse_record(""), VersionRecord::default());
    }

    #[test]
    fn empty_values_map_to_not_installed_or_unknown() {
        let record = parse_record("NODE:\nGIT:   \nOS:\n");
        assert_eq!(record.node, NOT_INSTALLED);
        assert_eq!(record.git, NOT_INSTALLED);
        assert_eq!(record.os, UNKNOWN);
        assert_eq!(record.npm, UNKNOWN);
    }

    #[test]
    fn duplicate_keys_resolve_last_write_wins() {
        let record = parse_record("NODE: v16.14.0\nNODE: v18.20.0\n");
        assert_eq!(record.node, "v18.20.0");
    }

    #[test]
    fn split_happens_at_first_colon_only() {
        let record = parse_record("OS: Linux 6.8: generic\n");
        assert_eq!(record.os, "Linux 6.8: generic");
    }

    #[test]
    fn lines_without_colons_are_skipped() {
        let record = parse_record("garbage line\nNODE v20\nNPM: 10.5.0\n");
        assert_eq!(record.npm, "10.5.0");
        assert_eq!(record.node, UNKNOWN);
    }

    #[test]
    fn parsing_is_deterministic_across_runs() {
        let output = "NODE: v18.20.0\nGIT: 2.44.0\nNPM: 10.5.0\nOS: Arch Linux\n";
        assert_eq!(parse_record(output), parse_record(output));
    }

    #[test]
    fn catalog_sections_preserve_emission_order() {
        let catalog = parse_catalog_output(
            "CURRENT: 18.20.0\nAVAILABLE:\n21.0.0\n20.10.0\nINSTALLED:\n18.20.0\n16.14.0",
        );
        assert_eq!(catalog.current, "18.20.0");
        assert_eq!(catalog.available, vec!["21.0.0", "20.10.0"]);
        assert_eq!(catalog.installed, vec!["18.20.0", "16.14.0"]);
    }

    #[test]
    fn empty_catalog_output_yields_unknown_current() {
        let catalog = parse_catalog_output("");
        assert_eq!(catalog.current, UNKNOWN);
        assert!(catalog.available.is_empty());
        assert!(catalog.installed.is_empty());
    }

    #[test]
    fn lines_before_any_header_are_dropped() {
        let catalog = parse_catalog_output("19.0.0\nCURRENT: 18.20.0\nINSTALLED:\n18.20.0\n");
        assert_eq!(catalog.current, "18.20.0");
        assert!(catalog.available.is_empty());
        assert_eq!(catalog.installed, vec!["18.20.0"]);
    }

    #[test]
    fn catalog_lists_are_not_deduplicated() {
        let catalog = parse_catalog_output("AVAILABLE:\n20.0.0\n20.0.0\n");
        assert_eq!(catalog.available, vec!["20.0.0", "20.0.0"]);
    }

    #[test]
    fn current_line_wins_wherever_it_appears() {
        let catalog = parse_catalog_output("AVAILABLE:\n21.0.0\nCURRENT: 18.20.0\n20.0.0\n");
        assert_eq!(catalog.current, "18.20.0");
        assert_eq!(catalog.available, vec!["21.0.0", "20.0.0"]);
    }

    #[tokio::test]
    async fn fetch_degrades_to_sentinels_when_script_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SynverConfig::default();
        config.scripts.dir = Some(dir.path().join("absent"));
        let aggregator = VersionAggregator::new(&config, Some("1.92.0".to_string()));
        let logger = Logger::new(None, false).unwrap();

        let record = aggregator.fetch(&logger).await;
        assert_eq!(record.editor, "1.92.0");
        assert_eq!(record.node, UNKNOWN);

        let catalog = aggregator.fetch_catalog(&logger).await;
        assert_eq!(catalog, RuntimeCatalog::default());
    }
}
