//! Process-wide tracing setup for the dispatch client binaries.

/// Initialize tracing with the `info` default.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init("info");
}

/// Tracing configuration (filters, output format).
pub mod tracing;
