//! Shared types for the envconf workspace
//!
//! This crate contains the scalar kind model and the error taxonomy used by
//! the binder, the coercer and the document codec.

pub mod error;
pub mod kind;

// Re-export commonly used types
pub use error::{BindError, CodecError, CoerceError, EnvconfError, Result};
pub use kind::{Kind, Scalar};
