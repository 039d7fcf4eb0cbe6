//! Semantic kinds of configuration leaves and their coerced values

use std::fmt;

/// Declared kind of a leaf field
///
/// Every leaf type reports one of these through `Leaf::KIND`. Only the scalar
/// kinds can be coerced from an environment string; `Sequence` and `Map`
/// exist so that collection fields can be tagged and rejected with a
/// descriptive error instead of failing to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Bool,
    Sequence,
    Map,
}

impl Kind {
    /// Lower-case name used in error messages and key listings
    pub fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Bool => "bool",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
        }
    }

    /// Whether values of this kind can be coerced from a raw string
    pub fn is_scalar(self) -> bool {
        !matches!(self, Kind::Sequence | Kind::Map)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A coerced scalar value, tagged with the width it was parsed at
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Isize(isize),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Usize(usize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
}

impl Scalar {
    /// Kind this value was coerced as
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::String(_) => Kind::String,
            Scalar::Isize(_) => Kind::Int,
            Scalar::I8(_) => Kind::Int8,
            Scalar::I16(_) => Kind::Int16,
            Scalar::I32(_) => Kind::Int32,
            Scalar::I64(_) => Kind::Int64,
            Scalar::Usize(_) => Kind::Uint,
            Scalar::U8(_) => Kind::Uint8,
            Scalar::U16(_) => Kind::Uint16,
            Scalar::U32(_) => Kind::Uint32,
            Scalar::U64(_) => Kind::Uint64,
            Scalar::F32(_) => Kind::Float32,
            Scalar::F64(_) => Kind::Float64,
            Scalar::Bool(_) => Kind::Bool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(Kind::Int32.to_string(), "int32");
        assert_eq!(Kind::Uint.to_string(), "uint");
        assert_eq!(Kind::Sequence.to_string(), "sequence");
    }

    #[test]
    fn test_scalar_kinds() {
        assert!(Kind::Float64.is_scalar());
        assert!(!Kind::Map.is_scalar());
        assert_eq!(Scalar::U16(7).kind(), Kind::Uint16);
        assert_eq!(Scalar::String("x".into()).kind(), Kind::String);
    }
}
