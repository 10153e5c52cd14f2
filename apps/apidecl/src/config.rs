//! # Settings
//!
//! Resolution of the few knobs the tool has. Flags win over environment
//! variables, which win over defaults. There is no config file.
//!
//! | flag          | variable         | default                  |
//! |---------------|------------------|--------------------------|
//! | `--bundle`    | `APIDECL_BUNDLE` | built-in declarations    |
//! | `--log-level` | `APIDECL_LOG`    | `warn`                   |

use crate::cli::CliError;
use apidecl_core::formats::decode_bundle;
use apidecl_core::{Registry, standard_registry};
use std::path::PathBuf;
use tracing::{debug, info};

pub const BUNDLE_ENV: &str = "APIDECL_BUNDLE";
pub const LOG_ENV: &str = "APIDECL_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Where the registry comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    Builtin,
    Bundle(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source: RegistrySource,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Settings {
    /// Resolve from flags and the process environment.
    pub fn resolve(bundle: Option<PathBuf>, log_level: Option<String>) -> Self {
        Self::resolve_with(bundle, log_level, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve_with(
        bundle: Option<PathBuf>,
        log_level: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let non_empty = |v: String| if v.trim().is_empty() { None } else { Some(v) };

        let source = bundle
            .or_else(|| env(BUNDLE_ENV).and_then(non_empty).map(PathBuf::from))
            .map_or(RegistrySource::Builtin, RegistrySource::Bundle);
        let log_filter = log_level
            .or_else(|| env(LOG_ENV).and_then(non_empty))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self { source, log_filter }
    }

    /// Build the built-in registry, or read and verify the configured bundle.
    pub fn load_registry(&self) -> Result<Registry, CliError> {
        match &self.source {
            RegistrySource::Builtin => {
                debug!("using built-in declarations");
                Ok(standard_registry()?)
            }
            RegistrySource::Bundle(path) => {
                info!(path = %path.display(), "loading canonical bundle");
                let bytes = std::fs::read(path)?;
                Ok(decode_bundle(&bytes)?)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let s = Settings::resolve_with(None, None, env(&[]));
        assert_eq!(s.source, RegistrySource::Builtin);
        assert_eq!(s.log_filter, "warn");
    }

    #[test]
    fn environment_fills_missing_flags() {
        let s = Settings::resolve_with(
            None,
            None,
            env(&[(BUNDLE_ENV, "/tmp/api.bundle"), (LOG_ENV, "apidecl=debug")]),
        );
        assert_eq!(s.source, RegistrySource::Bundle(PathBuf::from("/tmp/api.bundle")));
        assert_eq!(s.log_filter, "apidecl=debug");
    }

    #[test]
    fn flags_win_over_environment() {
        let s = Settings::resolve_with(
            Some(PathBuf::from("local.bundle")),
            Some("info".to_string()),
            env(&[(BUNDLE_ENV, "/tmp/api.bundle"), (LOG_ENV, "debug")]),
        );
        assert_eq!(s.source, RegistrySource::Bundle(PathBuf::from("local.bundle")));
        assert_eq!(s.log_filter, "info");
    }

    #[test]
    fn blank_environment_is_ignored() {
        let s = Settings::resolve_with(None, None, env(&[(BUNDLE_ENV, "  "), (LOG_ENV, "")]));
        assert_eq!(s.source, RegistrySource::Builtin);
        assert_eq!(s.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn missing_bundle_is_an_io_error() {
        let s = Settings::resolve_with(Some(PathBuf::from("/nonexistent/apidecl.bundle")), None, env(&[]));
        assert!(matches!(s.load_registry(), Err(CliError::Io(_))));
    }
}
