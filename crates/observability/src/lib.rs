//! Tracing and logging setup shared by every binary in the workspace.

/// Initialize process-wide tracing with the default filter (`info`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env(), "info");
}

/// Tracing configuration (filters, formatting).
pub mod tracing;
