//! Logging setup.
//!
//! Logs go to stderr so the dashboard (and `--json` output) own stdout.
//! Quiet by default; set `DEBUG_LOGGING=1` for debug output from the
//! missionboard crates, or `RUST_LOG` for full control.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_DIRECTIVE: &str = "warn";
const DEBUG_DIRECTIVE: &str = "info,missionboard_core=debug,missionboard_cli=debug";

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        DEBUG_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    }
}

pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(debug_logging)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    // A second init (tests) is not an error worth reporting
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .try_init();

    tracing::debug!(debug_logging, "missionboard logging initialized");
}
