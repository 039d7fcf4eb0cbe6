//! Error types for the envconf workspace

use crate::kind::Kind;
use thiserror::Error;

/// Main error type returned by the layered loader
#[derive(Error, Debug)]
pub enum EnvconfError {
    /// Environment binding errors
    #[error("Environment binding error: {0}")]
    Bind(#[from] BindError),

    /// Document decoding or encoding errors
    #[error("Document error: {0}")]
    Codec(#[from] CodecError),

    /// Configuration file missing
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Result type alias for envconf operations
pub type Result<T> = std::result::Result<T, EnvconfError>;

/// Scalar coercion errors, before any field context is known
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoerceError {
    /// The requested kind cannot be parsed from a string
    #[error("Kind {kind} not supported")]
    UnsupportedKind { kind: Kind },

    /// The raw string is not a valid value of the requested kind
    #[error("Invalid {kind} value {value:?}: {reason}")]
    Malformed {
        kind: Kind,
        value: String,
        reason: String,
    },
}

/// Environment binding errors, carrying the field path and external key
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    /// A tagged field has a kind outside the scalar set
    #[error("Kind {kind} not supported for field {path} (env {key})")]
    UnsupportedKind {
        path: String,
        key: String,
        kind: Kind,
    },

    /// The environment value does not parse as the field's kind
    #[error("Invalid value {value:?} for field {path} (env {key}, {kind}): {reason}")]
    Coercion {
        path: String,
        key: String,
        value: String,
        kind: Kind,
        reason: String,
    },

    /// A leaf rejected a scalar of the kind it declared
    #[error("Field {path} declared kind {expected} but rejected the coerced value")]
    KindMismatch { path: String, expected: Kind },
}

impl BindError {
    /// Attach field context to a coercion failure
    pub fn from_coerce(err: CoerceError, path: impl Into<String>, key: impl Into<String>) -> Self {
        match err {
            CoerceError::UnsupportedKind { kind } => BindError::UnsupportedKind {
                path: path.into(),
                key: key.into(),
                kind,
            },
            CoerceError::Malformed {
                kind,
                value,
                reason,
            } => BindError::Coercion {
                path: path.into(),
                key: key.into(),
                value,
                kind,
                reason,
            },
        }
    }

    /// Dotted path of the field that failed
    pub fn path(&self) -> &str {
        match self {
            BindError::UnsupportedKind { path, .. }
            | BindError::Coercion { path, .. }
            | BindError::KindMismatch { path, .. } => path,
        }
    }
}

/// Document codec errors
#[derive(Error, Debug)]
pub enum CodecError {
    /// Malformed document or a value that does not fit the target
    #[error("Failed to decode document: {0}")]
    Decode(String),

    /// Serialization failure
    #[error("Failed to encode document: {0}")]
    Encode(String),

    /// Reading the document failed
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
}
