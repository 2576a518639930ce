//! `tracing` setup for playlyzer.
//!
//! Diagnostic events go to stderr so the colored command output on stdout stays
//! readable. The filter comes from `RUST_LOG`; without it only warnings from this
//! crate are shown, or debug events when `--verbose` is passed.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber.
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "playlyzer=debug,warn"
    } else {
        "playlyzer=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
