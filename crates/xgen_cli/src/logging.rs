//! Tracing subscriber setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::GlobalArgs;

/// Returns the filter used when `RUST_LOG` is not set.
pub fn default_filter(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `--quiet`/`--verbose`.
pub fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(global)));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(global.color)
                .with_target(global.verbose),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(quiet: bool, verbose: bool) -> GlobalArgs {
        GlobalArgs {
            quiet,
            verbose,
            color: false,
            config: None,
        }
    }

    #[test]
    fn default_filter_levels() {
        assert_eq!(default_filter(&global(false, false)), "warn");
        assert_eq!(default_filter(&global(false, true)), "debug");
        assert_eq!(default_filter(&global(true, false)), "error");
        assert_eq!(default_filter(&global(true, true)), "error");
    }
}
