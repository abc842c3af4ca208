use dirs::home_dir;
use std::{env, path::PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber; callers go through [`crate::init`].
///
/// `RUST_LOG` directives are honoured; without them the crate logs at `info`.
pub(crate) fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ledger_core=info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

const DEFAULT_DIR_NAME: &str = ".ledger_core";

/// Returns the application data directory, defaulting to `~/.ledger_core`.
///
/// `LEDGER_CORE_HOME` overrides the location.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("LEDGER_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
