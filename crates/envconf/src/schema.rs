//! Attribute tree definitions
//!
//! A configuration record describes its own shape by implementing
//! [`Configure`]: it hands each nested record and each environment-tagged leaf
//! to a [`Visitor`], in declaration order. `#[derive(Configure)]` generates
//! this; writing it by hand is equally valid:
//!
//! ```rust
//! use envconf::{Configure, Visitor};
//!
//! #[derive(Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl Configure for Server {
//!     fn walk<V: Visitor>(&mut self, visitor: &mut V) -> Result<(), V::Error> {
//!         visitor.leaf("host", "SERVER_HOST", &mut self.host)?;
//!         visitor.leaf("port", "SERVER_PORT", &mut self.port)?;
//!         Ok(())
//!     }
//! }
//! ```

use envconf_types::{Kind, Scalar};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::PathBuf;

/// A record whose fields can be walked by a [`Visitor`]
pub trait Configure {
    /// Visit every nested record and tagged leaf in declaration order
    fn walk<V: Visitor>(&mut self, visitor: &mut V) -> Result<(), V::Error>;
}

/// Callback interface driven by [`Configure::walk`]
pub trait Visitor {
    type Error;

    /// A nested record field named `name`
    fn record<C: Configure>(&mut self, name: &'static str, record: &mut C)
        -> Result<(), Self::Error>;

    /// A leaf field named `name`, tagged with environment variable `key`
    fn leaf<L: Leaf>(&mut self, name: &'static str, key: &'static str, slot: &mut L)
        -> Result<(), Self::Error>;
}

/// An optional record is materialized with `Default` as soon as it is walked.
impl<C: Configure + Default> Configure for Option<C> {
    fn walk<V: Visitor>(&mut self, visitor: &mut V) -> Result<(), V::Error> {
        self.get_or_insert_with(C::default).walk(visitor)
    }
}

impl<C: Configure> Configure for Box<C> {
    fn walk<V: Visitor>(&mut self, visitor: &mut V) -> Result<(), V::Error> {
        (**self).walk(visitor)
    }
}

/// A field type that can receive an environment override
pub trait Leaf: Sized {
    /// Kind the raw environment string is coerced as
    const KIND: Kind;

    /// Build the field value from a scalar coerced as [`Leaf::KIND`]
    ///
    /// Returns `None` when handed a scalar of any other kind.
    fn from_scalar(value: Scalar) -> Option<Self>;
}

macro_rules! scalar_leaf {
    ($($ty:ty => $kind:ident, $variant:ident;)*) => {
        $(
            impl Leaf for $ty {
                const KIND: Kind = Kind::$kind;

                fn from_scalar(value: Scalar) -> Option<Self> {
                    match value {
                        Scalar::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

scalar_leaf! {
    String => String, String;
    isize => Int, Isize;
    i8 => Int8, I8;
    i16 => Int16, I16;
    i32 => Int32, I32;
    i64 => Int64, I64;
    usize => Uint, Usize;
    u8 => Uint8, U8;
    u16 => Uint16, U16;
    u32 => Uint32, U32;
    u64 => Uint64, U64;
    f32 => Float32, F32;
    f64 => Float64, F64;
    bool => Bool, Bool;
}

impl Leaf for PathBuf {
    const KIND: Kind = Kind::String;

    fn from_scalar(value: Scalar) -> Option<Self> {
        match value {
            Scalar::String(v) => Some(PathBuf::from(v)),
            _ => None,
        }
    }
}

/// An optional leaf stays `None` unless an override is applied.
impl<L: Leaf> Leaf for Option<L> {
    const KIND: Kind = L::KIND;

    fn from_scalar(value: Scalar) -> Option<Self> {
        L::from_scalar(value).map(Some)
    }
}

// Collections may be tagged but are rejected when their key is present.
macro_rules! unsupported_leaf {
    ($kind:ident => $($ty:ty),* $(,)?) => {
        $(
            impl<T> Leaf for $ty {
                const KIND: Kind = Kind::$kind;

                fn from_scalar(_value: Scalar) -> Option<Self> {
                    None
                }
            }
        )*
    };
}

unsupported_leaf!(Sequence => Vec<T>, VecDeque<T>, HashSet<T>, BTreeSet<T>);

impl<K, T> Leaf for HashMap<K, T> {
    const KIND: Kind = Kind::Map;

    fn from_scalar(_value: Scalar) -> Option<Self> {
        None
    }
}

impl<K, T> Leaf for BTreeMap<K, T> {
    const KIND: Kind = Kind::Map;

    fn from_scalar(_value: Scalar) -> Option<Self> {
        None
    }
}
