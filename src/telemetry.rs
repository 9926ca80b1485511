//! Logging setup for programs embedding the ledger.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "daily_ledger=info";

/// Installs a global fmt subscriber, filtered by `RUST_LOG` when set.
///
/// Returns `false` when a global subscriber was already installed, by an earlier
/// call or by the host program; the existing one is left in place.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_keeps_existing_subscriber() {
        init();
        assert!(!init());
        assert!(tracing::dispatcher::has_been_set());
    }
}
