// src/config.rs
//!
//! Startup configuration: vault location and logging
//!

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable naming the vault directory
pub const VAULT_DIR_ENV: &str = "LOCAL_FILE_INTERFACE_VAULT";

/// Vault directory below the app's local data dir when nothing else is given
pub const VAULT_DIRECTORY: &str = "vault";

/// Settings record inside the app's store area
pub const SETTINGS_STORE: &str = "settings.json";

const DEFAULT_LOG_FILTER: &str = "local_file_interface_lib=info";

/// Pick the vault root: CLI argument, then environment, then `fallback`
pub fn resolve_vault_root(
    cli_arg: Option<String>,
    env_value: Option<String>,
    fallback: PathBuf,
) -> PathBuf {
    let usable = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && !v.starts_with('-'))
    };

    usable(cli_arg)
        .or_else(|| usable(env_value))
        .map(PathBuf::from)
        .unwrap_or(fallback)
}

/// Vault root from the process arguments and environment
pub fn vault_root_from_env(fallback: PathBuf) -> PathBuf {
    resolve_vault_root(
        std::env::args().nth(1),
        std::env::var(VAULT_DIR_ENV).ok(),
        fallback,
    )
}

/// Install the global tracing subscriber (`RUST_LOG` overrides the default)
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second call (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_argument_wins() {
        let root = resolve_vault_root(
            Some("/data/vault".to_string()),
            Some("/env/vault".to_string()),
            PathBuf::from("/fallback"),
        );
        assert_eq!(root, PathBuf::from("/data/vault"));
    }

    #[test]
    fn test_env_used_without_argument() {
        let root = resolve_vault_root(None, Some("/env/vault".to_string()), PathBuf::from("/fallback"));
        assert_eq!(root, PathBuf::from("/env/vault"));
    }

    #[test]
    fn test_flags_and_blanks_are_skipped() {
        let root = resolve_vault_root(
            Some("--devtools".to_string()),
            Some("   ".to_string()),
            PathBuf::from("/fallback"),
        );
        assert_eq!(root, PathBuf::from("/fallback"));
    }
}
