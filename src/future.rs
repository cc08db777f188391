/*============================================================
  Synavera Project: Syn-Ver
  Module: synver_core::future
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1
  ------------------------------------------------------------
  Purpose:
    Provide scaffolding for Syn-Ver-Core roadmap features such
    as alternate version-manager backends and host notification
    sinks.

  Security / Safety Notes:
    No operational code is executed; this module documents
    planned extension points to guide safe implementations.

  Dependencies:
    None at runtime; placeholder traits only.

  Operational Scope:
    Referenced by developers when implementing Syn-Ver v2+.

  Revision History:
    2025-03-18 COD  Added future expansion scaffolding.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit documentation of deferred capabilities
    - Clearly fenced placeholders to avoid accidental use
============================================================*/

#![allow(dead_code)]

use crate::version_info::RuntimeCatalog;

/// Placeholder trait for version-manager backends beyond the stock
/// shell scripts (nvm, fnm, mise).
pub trait CatalogBackend {
    /// Enumerate the backend's runtime catalog.
    fn enumerate(&self) -> RuntimeCatalog;
}

/// Planned hook for notifying the host layer of switch outcomes
/// without waiting for a snapshot re-read.
pub trait SwitchNotifier {
    /// Deliver a switch outcome to the host.
    fn notify(&self, version: &str, succeeded: bool);
}

/// Backend registration entry point. Currently a stub.
pub fn register_backend<T>(_backend: T)
where
    T: CatalogBackend + SwitchNotifier + Send + Sync + 'static,
{
    // Placeholder: backend registry lands in Syn-Ver v2.
}
