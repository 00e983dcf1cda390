//! Environment-driven tuning for property-test suites.
//!
//! Suites call [`ProptestRunProfile::load`] with their own defaults; CI and
//! local runs override them through [`CASES_ENV_KEY`] and [`FORK_ENV_KEY`].
//! Malformed overrides are logged and ignored rather than failing the suite.

use std::env;
use std::fmt;
use std::num::ParseIntError;

/// Environment variable overriding the number of cases per property.
pub const CASES_ENV_KEY: &str = "WUF_PROPTEST_CASES";
/// Environment variable toggling forked proptest execution.
pub const FORK_ENV_KEY: &str = "WUF_PBT_FORK";

/// Resolved property-test settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Load a profile from the environment, falling back to the given
    /// defaults for unset or malformed variables.
    ///
    /// # Examples
    ///
    /// ```
    /// use wuf_test_support::proptest_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(FORK_ENV_KEY, default_fork, parse_switch),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether each case runs in a forked subprocess.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

#[derive(Debug, PartialEq, Eq)]
enum OverrideError {
    NotANumber(ParseIntError),
    ZeroCases,
    NotASwitch,
}

impl fmt::Display for OverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(error) => write!(f, "not a case count: {error}"),
            Self::ZeroCases => f.write_str("case count must be positive"),
            Self::NotASwitch => f.write_str("expected one of true/false/1/0/yes/no/on/off"),
        }
    }
}

fn override_or<T>(
    key: &'static str,
    default: T,
    parse: impl Fn(&str) -> Result<T, OverrideError>,
) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|error| {
        tracing::warn!(env = key, raw = %raw, %error, "ignoring malformed proptest override");
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, OverrideError> {
    let cases = raw
        .trim()
        .parse::<u32>()
        .map_err(OverrideError::NotANumber)?;
    if cases == 0 {
        return Err(OverrideError::ZeroCases);
    }
    Ok(cases)
}

fn parse_switch(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::NotASwitch),
    }
}
