//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests use [`Env::mock()`] backed by a `HashMap`, so config overrides can
//! be exercised without touching the process environment.

use std::collections::HashMap;
use std::str::FromStr;

/// Environment variable reader.
#[derive(Clone, Debug)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

/// Outcome of reading a typed environment variable.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvValue<T> {
    /// Variable not set.
    Missing,
    /// Variable set and parsed.
    Parsed(T),
    /// Variable set but not parseable as `T`; holds the raw value.
    Invalid(String),
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    #[cfg(test)]
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.overrides {
            Some(map) => map.get(name).cloned().ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// Look up a variable and parse it, trimming surrounding whitespace.
    pub fn parsed<T: FromStr>(&self, name: &str) -> EnvValue<T> {
        match self.var(name) {
            Ok(raw) => match raw.trim().parse::<T>() {
                Ok(value) => EnvValue::Parsed(value),
                Err(_) => EnvValue::Invalid(raw),
            },
            Err(_) => EnvValue::Missing,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}
