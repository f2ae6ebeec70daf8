use std::io;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Default for Verbosity {
    fn default() -> Verbosity {
        Verbosity::Normal
    }
}

impl Verbosity {
    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "taebaek=error",
            Verbosity::Normal => "taebaek=info",
            Verbosity::Verbose => "taebaek=debug",
        }
    }
}

/// Installs the diagnostic subscriber, writing to stderr.
///
/// Call this once at startup. Safe to call multiple times.
/// `RUST_LOG` takes precedence over `verbosity`.
pub fn init_tracing(verbosity: Verbosity) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .with(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives() {
        assert_eq!(Verbosity::default().directive(), "taebaek=info");
        assert_eq!(Verbosity::Verbose.directive(), "taebaek=debug");
        assert_eq!(Verbosity::Quiet.directive(), "taebaek=error");
    }

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_tracing(Verbosity::Quiet);
        init_tracing(Verbosity::Verbose);
    }
}
