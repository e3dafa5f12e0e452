use std::{ffi::OsString, time::Duration};

/// Environment variable that turns on error reporting and debug logging.
pub const DEBUG_ENV: &str = "DEBUG";

/// Upper bound on the GitHub round trip.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Process-wide settings, resolved once at startup and passed down
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Report errors on stderr and emit debug logs.
    pub debug: bool,
    /// Deadline for the whole GitHub fetch.
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Resolves settings through `lookup` instead of the process
    /// environment. `DEBUG` is honoured by presence; any non-empty value,
    /// including `0` or `false`, enables it.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let debug = lookup(DEBUG_ENV).is_some_and(|value| !value.is_empty());

        Self {
            debug,
            ..Self::default()
        }
    }
}
