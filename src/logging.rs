//! Logging setup for the `civic` binary.
//!
//! Diagnostics always go to stderr so `--json` output on stdout stays
//! machine readable.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Log level implied by the `-v`/`-q` flags.
#[must_use]
pub const fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter: `RUST_LOG` wins, otherwise the flag level.
fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)))
}

/// Install the global subscriber.
///
/// `json` selects structured output; `None` reads `CIVIC_LOG_FORMAT`
/// (`json` or anything else for plain text).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(
    verbose: u8,
    quiet: bool,
    json: Option<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let json = json.unwrap_or_else(|| {
        std::env::var("CIVIC_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"))
    });
    let filter = build_filter(verbose, quiet);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .with_span_events(FmtSpan::NONE);

    if json {
        builder.json().try_init()
    } else {
        builder.without_time().try_init()
    }
}
