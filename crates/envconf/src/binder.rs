//! Environment binder
//!
//! [`Binder`] walks a configuration record depth-first in declaration order.
//! Optional records are materialized as they are reached; each tagged leaf
//! whose key is present in the [`EnvSource`] is coerced and written in place.
//! The first failure aborts the walk and nothing already written is undone.

use crate::coerce::coerce;
use crate::env::EnvSource;
use crate::schema::{Configure, Leaf, Visitor};
use envconf_types::{BindError, Kind};
use std::convert::Infallible;
use tracing::{debug, trace};

/// Applies environment overrides to a configuration record
pub struct Binder<E> {
    env: E,
    path: Vec<&'static str>,
    applied: usize,
}

impl<E: EnvSource> Binder<E> {
    pub fn new(env: E) -> Self {
        Self {
            env,
            path: Vec::new(),
            applied: 0,
        }
    }

    /// Bind `root` against the environment
    ///
    /// On error `root` may be partially updated.
    pub fn bind<C: Configure>(mut self, root: &mut C) -> Result<(), BindError> {
        root.walk(&mut self)?;
        debug!(overrides = self.applied, "environment binding complete");
        Ok(())
    }
}

impl<E: EnvSource> Visitor for Binder<E> {
    type Error = BindError;

    fn record<C: Configure>(&mut self, name: &'static str, record: &mut C) -> Result<(), BindError> {
        self.path.push(name);
        record.walk(self)?;
        self.path.pop();
        Ok(())
    }

    fn leaf<L: Leaf>(
        &mut self,
        name: &'static str,
        key: &'static str,
        slot: &mut L,
    ) -> Result<(), BindError> {
        let Some(raw) = self.env.get(key) else {
            trace!(key, "environment key not set");
            return Ok(());
        };

        let path = field_path(&self.path, name);
        let value = coerce(&raw, L::KIND).map_err(|err| BindError::from_coerce(err, &path, key))?;
        *slot = L::from_scalar(value).ok_or_else(|| BindError::KindMismatch {
            path: path.clone(),
            expected: L::KIND,
        })?;

        // Values may be secrets; only the field and key are logged.
        debug!(field = %path, key, "applied environment override");
        self.applied += 1;
        Ok(())
    }
}

/// One environment key declared by a configuration record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvKey {
    /// Dotted field path from the root record
    pub path: String,
    /// External key
    pub key: &'static str,
    /// Kind the value is coerced as
    pub kind: Kind,
}

/// List every environment key `C` declares, in traversal order
///
/// Walks a default instance, so optional records are always descended into.
pub fn env_keys<C: Configure + Default>() -> Vec<EnvKey> {
    let mut collector = KeyCollector::default();
    match C::default().walk(&mut collector) {
        Ok(()) => collector.keys,
        Err(never) => match never {},
    }
}

#[derive(Default)]
struct KeyCollector {
    path: Vec<&'static str>,
    keys: Vec<EnvKey>,
}

impl Visitor for KeyCollector {
    type Error = Infallible;

    fn record<C: Configure>(&mut self, name: &'static str, record: &mut C) -> Result<(), Infallible> {
        self.path.push(name);
        record.walk(self)?;
        self.path.pop();
        Ok(())
    }

    fn leaf<L: Leaf>(
        &mut self,
        name: &'static str,
        key: &'static str,
        _slot: &mut L,
    ) -> Result<(), Infallible> {
        self.keys.push(EnvKey {
            path: field_path(&self.path, name),
            key,
            kind: L::KIND,
        });
        Ok(())
    }
}

fn field_path(parents: &[&'static str], name: &str) -> String {
    let mut path = parents.join(".");
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(name);
    path
}
