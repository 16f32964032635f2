//! CLI command definitions, argument parsing and logging setup.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use tracing_subscriber::EnvFilter;

/// Filter used when neither `--verbose` nor `BONDCURVE_LOG` is given.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Pick the tracing filter directive.
///
/// `--verbose` wins, then the `BONDCURVE_LOG` value, then warnings only.
pub fn log_filter(verbose: bool, env_value: Option<String>) -> String {
    if verbose {
        return "bondcurve=debug".to_string();
    }
    env_value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Install the stderr tracing subscriber.
pub fn init_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_forces_debug() {
        assert_eq!(log_filter(true, Some("error".into())), "bondcurve=debug");
    }

    #[test]
    fn env_value_used_when_present() {
        assert_eq!(log_filter(false, Some("info".into())), "info");
    }

    #[test]
    fn defaults_to_warn() {
        assert_eq!(log_filter(false, None), "warn");
        assert_eq!(log_filter(false, Some("  ".into())), "warn");
    }

    #[test]
    fn init_logging_twice_does_not_panic() {
        init_logging("warn");
        init_logging("debug");
    }
}
