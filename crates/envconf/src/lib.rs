//! Layered configuration for typed records
//!
//! A configuration record is populated in two passes: a YAML document supplies
//! defaults, then environment variables declared on individual fields override
//! them. Overrides are applied only when the variable is set.
//!
//! ```rust
//! use envconf::{Configure, ConfigLoader, MapEnv};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize, Configure)]
//! struct Config {
//!     #[env(from = "APP_NAME")]
//!     name: String,
//!     #[env(from)]
//!     port: u16,
//!     #[env(nested)]
//!     #[serde(default)]
//!     database: Option<Database>,
//! }
//!
//! #[derive(Debug, Default, Serialize, Deserialize, Configure)]
//! struct Database {
//!     #[env(from = "DATABASE_URL")]
//!     url: String,
//! }
//!
//! let env = MapEnv::new().with("PORT", "9090");
//! let mut config = Config::default();
//! ConfigLoader::new()
//!     .with_env(env)
//!     .load("name: billing\nport: 8080\n".as_bytes(), &mut config)
//!     .unwrap();
//!
//! assert_eq!(config.name, "billing");
//! assert_eq!(config.port, 9090);
//! assert!(config.database.is_some());
//! ```
//!
//! ## Untagged record fields
//!
//! Only fields marked `#[env(nested)]` are traversed. A record-typed field
//! with no `env` attribute keeps whatever the document gave it, and none of
//! its own `from` keys are consulted. The derive flags such a field with a
//! deprecation warning; mark it `#[env(skip)]` when leaving it out is intended.

pub mod binder;
pub mod codec;
pub mod coerce;
pub mod env;
pub mod loader;
pub mod schema;

#[doc(hidden)]
#[path = "private.rs"]
pub mod __private;

pub use binder::{env_keys, Binder, EnvKey};
pub use codec::{DocumentCodec, YamlCodec};
pub use coerce::coerce;
pub use env::{EnvSource, MapEnv, StdEnv};
pub use envconf_derive::Configure;
pub use envconf_types::{BindError, CodecError, CoerceError, EnvconfError, Kind, Result, Scalar};
pub use loader::ConfigLoader;
pub use schema::{Configure, Leaf, Visitor};

use serde::{de::DeserializeOwned, Serialize};
use std::io::Read;

/// Decode a YAML document into `target`, then apply process environment overrides
pub fn load<R, T>(reader: R, target: &mut T) -> Result<()>
where
    R: Read,
    T: Configure + Serialize + DeserializeOwned,
{
    ConfigLoader::new().load(reader, target)
}

/// Apply process environment overrides to `target`
pub fn from_env<T: Configure>(target: &mut T) -> Result<()> {
    ConfigLoader::new().from_env(target)
}

/// Decode a YAML document into `target`
pub fn from_document<R, T>(reader: R, target: &mut T) -> Result<()>
where
    R: Read,
    T: Serialize + DeserializeOwned,
{
    ConfigLoader::new().from_document(reader, target)
}

/// Encode `source` as YAML, or the error text if encoding fails
pub fn to_text<T: Serialize + ?Sized>(source: &T) -> String {
    ConfigLoader::new().to_text(source)
}
