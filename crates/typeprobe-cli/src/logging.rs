//! Logging initialization for the CLI.
//!
//! Diagnostics go to stderr only. Stdout carries the command's report, so
//! `typeprobe --json analyze | jq` works at any verbosity.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose events follow `-v`; everything else stays at `warn` unless
/// `RUST_LOG` says otherwise.
const OWN_TARGETS: &[&str] = &["typeprobe_cli", "typeprobe_core"];

/// Install the global subscriber.
///
/// `verbosity` 0 shows INFO and up, 1 adds DEBUG (per-run analysis totals,
/// resolved entries), 2+ adds TRACE.
///
/// With `json`, each event is one JSON line on stderr carrying the active
/// command span:
/// ```json
/// {"timestamp":"...","level":"WARN","fields":{"message":"dependency analysis failed","dependency":"left-pad","code":"MANIFEST_INVALID"},"span":{"cmd":"analyze","cwd":"/path","name":"analyze"}}
/// ```
///
/// # Panics
/// Panics if a global subscriber is already installed.
pub fn init(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    for target in OWN_TARGETS {
        if let Ok(directive) = format!("{target}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
