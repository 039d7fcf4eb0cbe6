//! Environment variable sources
//!
//! The binder never reads `std::env` directly; it asks an [`EnvSource`]. This
//! allows binding against an in-memory map in tests and in embedders that
//! assemble their environment from somewhere other than the process.

use std::collections::BTreeMap;

/// Lookup of external keys
pub trait EnvSource {
    /// Value of the variable `name`, or `None` when it is not set
    fn get(&self, name: &str) -> Option<String>;
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// Environment source that reads from the process environment
///
/// Variables whose value is not valid unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment source backed by a map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Builder-style [`MapEnv::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Remove a variable
    pub fn unset(&mut self, name: &str) {
        self.vars.remove(name);
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_env_lookup() {
        let mut env = MapEnv::from_iter([("PORT", "8080")]);
        assert_eq!(env.get("PORT").as_deref(), Some("8080"));
        assert_eq!(env.get("port"), None);

        env.set("PORT", "9090");
        assert_eq!(env.get("PORT").as_deref(), Some("9090"));

        env.unset("PORT");
        assert!(env.is_empty());
    }

    #[test]
    fn test_reference_forwards() {
        fn lookup<S: EnvSource>(source: S, name: &str) -> Option<String> {
            source.get(name)
        }

        let env = MapEnv::new().with("HOST", "localhost");
        assert_eq!(lookup(&env, "HOST").as_deref(), Some("localhost"));
        assert_eq!(lookup(&env as &dyn EnvSource, "HOST").as_deref(), Some("localhost"));
    }

    #[test]
    fn test_std_env_missing_key() {
        assert_eq!(StdEnv.get("ENVCONF_TEST_DEFINITELY_NOT_SET_7F3A"), None);
    }
}
