//! Structured logging setup.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary (or a test) through [`init_logging`].

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "dagraph=info";

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// Defaults to [`DEFAULT_FILTER`]. Safe to call more than once: later calls
/// are ignored.
pub fn init_logging() {
    init_logging_with(DEFAULT_FILTER);
}

/// Like [`init_logging`] with an explicit fallback filter (`RUST_LOG` still
/// wins when set).
pub fn init_logging_with(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .try_init();
}
