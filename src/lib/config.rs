//! Configuration from environment variables
//!
//! - `SHELLAC_VERBOSE`: print the decoded record before running
//! - `SHELLAC_DEBUG`: debug-level diagnostics
//! - `SHELLAC_QUIET`: do not echo the command line
//! - `SHELLAC_SUDO`: always run commands via sudo(8)
//! - `SHELLAC_LOG`: explicit tracing filter, e.g. `shellac=trace`

use std::env;

/// Filter used when neither `SHELLAC_LOG` nor debug mode is set
pub const DEFAULT_LOG_FILTER: &str = "shellac=warn";

/// Filter used in debug mode
pub const DEBUG_LOG_FILTER: &str = "shellac=debug";

/// Configuration from environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub verbose: bool,
    pub debug: bool,
    pub quiet: bool,
    pub sudo: bool,
    pub log_filter: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &str| lookup(name).is_some_and(|v| is_truthy(&v));
        Self {
            verbose: flag("SHELLAC_VERBOSE"),
            debug: flag("SHELLAC_DEBUG"),
            quiet: flag("SHELLAC_QUIET"),
            sudo: flag("SHELLAC_SUDO"),
            log_filter: lookup("SHELLAC_LOG").filter(|v| !v.is_empty()),
        }
    }

    /// The tracing filter directive to install
    pub fn log_filter(&self) -> &str {
        match (&self.log_filter, self.debug) {
            (Some(filter), _) => filter.as_str(),
            (None, true) => DEBUG_LOG_FILTER,
            (None, false) => DEFAULT_LOG_FILTER,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value == "true"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_bool_values() {
        let config = config(&[
            ("SHELLAC_VERBOSE", "1"),
            ("SHELLAC_QUIET", "true"),
            ("SHELLAC_SUDO", "yes"),
        ]);
        assert!(config.verbose);
        assert!(config.quiet);
        assert!(!config.sudo);
    }

    #[test]
    fn test_log_filter_precedence() {
        assert_eq!(config(&[("SHELLAC_DEBUG", "1")]).log_filter(), DEBUG_LOG_FILTER);
        assert_eq!(
            config(&[("SHELLAC_DEBUG", "1"), ("SHELLAC_LOG", "shellac=trace")]).log_filter(),
            "shellac=trace"
        );
        assert_eq!(config(&[("SHELLAC_LOG", "")]).log_filter(), DEFAULT_LOG_FILTER);
    }
}
