//! Configuration loader implementation

use crate::binder::Binder;
use crate::codec::{DocumentCodec, YamlCodec};
use crate::env::{EnvSource, StdEnv};
use crate::schema::Configure;
use anyhow::Context;
use envconf_types::{CodecError, EnvconfError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Loader that layers a document and environment overrides onto a record
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader<C = YamlCodec, E = StdEnv> {
    codec: C,
    env: E,
}

impl ConfigLoader {
    /// Loader reading YAML documents and the process environment
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: DocumentCodec, E: EnvSource> ConfigLoader<C, E> {
    /// Replace the environment source
    pub fn with_env<E2: EnvSource>(self, env: E2) -> ConfigLoader<C, E2> {
        ConfigLoader {
            codec: self.codec,
            env,
        }
    }

    /// Replace the document codec
    pub fn with_codec<C2: DocumentCodec>(self, codec: C2) -> ConfigLoader<C2, E> {
        ConfigLoader {
            codec,
            env: self.env,
        }
    }

    /// Decode `reader` into `target`, then apply environment overrides
    ///
    /// If the document cannot be read or decoded the environment is never consulted.
    pub fn load<R, T>(&self, reader: R, target: &mut T) -> Result<()>
    where
        R: Read,
        T: Configure + Serialize + DeserializeOwned,
    {
        self.from_document(reader, target)?;
        self.from_env(target)
    }

    /// Decode `reader` into `target` without consulting the environment
    pub fn from_document<R, T>(&self, mut reader: R, target: &mut T) -> Result<()>
    where
        R: Read,
        T: Serialize + DeserializeOwned,
    {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(CodecError::from)?;
        self.codec.decode(&content, target)?;
        debug!(bytes = content.len(), "document decoded");
        Ok(())
    }

    /// Apply environment overrides to `target`
    pub fn from_env<T: Configure>(&self, target: &mut T) -> Result<()> {
        Binder::new(&self.env).bind(target)?;
        Ok(())
    }

    /// Encode `source`, returning the error text in place of the document on failure
    ///
    /// Callers cannot tell an encoding failure from a document; use
    /// [`ConfigLoader::try_to_text`] when that matters.
    pub fn to_text<T: Serialize + ?Sized>(&self, source: &T) -> String {
        self.try_to_text(source).unwrap_or_else(|e| e.to_string())
    }

    /// Encode `source`
    pub fn try_to_text<T: Serialize + ?Sized>(&self, source: &T) -> std::result::Result<String, CodecError> {
        self.codec.encode(source)
    }

    /// Load a document from `path`, then apply environment overrides
    pub fn load_file<P, T>(&self, path: P, target: &mut T) -> anyhow::Result<()>
    where
        P: AsRef<Path>,
        T: Configure + Serialize + DeserializeOwned,
    {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EnvconfError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open configuration file {}", path.display()))?;
        self.load(file, target)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        debug!(path = %path.display(), "configuration loaded");
        Ok(())
    }

    /// Write `source` to `path` as an example configuration file
    pub fn create_example<P, T>(&self, path: P, source: &T) -> anyhow::Result<()>
    where
        P: AsRef<Path>,
        T: Serialize + ?Sized,
    {
        let content = self
            .try_to_text(source)
            .context("Failed to serialize example configuration")?;

        std::fs::write(path.as_ref(), content)
            .context("Failed to write example configuration file")?;

        Ok(())
    }
}
