//! String to scalar coercion
//!
//! Environment values are raw text. [`coerce`] turns one into a [`Scalar`] of
//! the kind the target field declared. The function is pure; field context is
//! attached by the binder.

use envconf_types::{CoerceError, Kind, Scalar};
use std::fmt::Display;
use std::str::FromStr;

/// Parse `raw` as a value of `kind`
pub fn coerce(raw: &str, kind: Kind) -> Result<Scalar, CoerceError> {
    let value = match kind {
        Kind::String => Scalar::String(raw.to_string()),
        Kind::Int => Scalar::Isize(parse_number(raw, kind)?),
        Kind::Int8 => Scalar::I8(parse_number(raw, kind)?),
        Kind::Int16 => Scalar::I16(parse_number(raw, kind)?),
        Kind::Int32 => Scalar::I32(parse_number(raw, kind)?),
        Kind::Int64 => Scalar::I64(parse_number(raw, kind)?),
        Kind::Uint => Scalar::Usize(parse_unsigned(raw, kind)?),
        Kind::Uint8 => Scalar::U8(parse_unsigned(raw, kind)?),
        Kind::Uint16 => Scalar::U16(parse_unsigned(raw, kind)?),
        Kind::Uint32 => Scalar::U32(parse_unsigned(raw, kind)?),
        Kind::Uint64 => Scalar::U64(parse_unsigned(raw, kind)?),
        Kind::Float32 => Scalar::F32(parse_float(raw, kind, f32::is_finite)?),
        Kind::Float64 => Scalar::F64(parse_float(raw, kind, f64::is_finite)?),
        Kind::Bool => Scalar::Bool(parse_bool(raw).ok_or_else(|| CoerceError::Malformed {
            kind,
            value: raw.to_string(),
            reason: "expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False"
                .to_string(),
        })?),
        Kind::Sequence | Kind::Map => return Err(CoerceError::UnsupportedKind { kind }),
    };

    Ok(value)
}

/// Boolean spellings accepted for `bool` fields
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_number<T>(raw: &str, kind: Kind) -> Result<T, CoerceError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>().map_err(|e| CoerceError::Malformed {
        kind,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

// A finite literal that overflows to infinity is out of range; only the
// inf/nan spellings may produce a non-finite value.
fn parse_float<T>(raw: &str, kind: Kind, is_finite: fn(T) -> bool) -> Result<T, CoerceError>
where
    T: FromStr + Copy,
    T::Err: Display,
{
    let value = parse_number::<T>(raw, kind)?;
    if is_finite(value) {
        return Ok(value);
    }

    let spelled = raw.trim_start_matches(['+', '-']).to_ascii_lowercase();
    if matches!(spelled.as_str(), "inf" | "infinity" | "nan") {
        return Ok(value);
    }
    Err(CoerceError::Malformed {
        kind,
        value: raw.to_string(),
        reason: "value out of range".to_string(),
    })
}

// Unsigned kinds take no sign at all, not even '+'
fn parse_unsigned<T>(raw: &str, kind: Kind) -> Result<T, CoerceError>
where
    T: FromStr,
    T::Err: Display,
{
    if raw.starts_with('+') {
        return Err(CoerceError::Malformed {
            kind,
            value: raw.to_string(),
            reason: "unsigned value cannot carry a sign".to_string(),
        });
    }
    parse_number(raw, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_identity() {
        assert_eq!(
            coerce("  some string ", Kind::String).unwrap(),
            Scalar::String("  some string ".to_string())
        );
        assert_eq!(coerce("", Kind::String).unwrap(), Scalar::String(String::new()));
    }

    #[test]
    fn test_signed_integers() {
        assert_eq!(coerce("31337", Kind::Int).unwrap(), Scalar::Isize(31337));
        assert_eq!(coerce("-1", Kind::Int32).unwrap(), Scalar::I32(-1));
        assert_eq!(coerce("-2", Kind::Int64).unwrap(), Scalar::I64(-2));
        assert_eq!(coerce("+5", Kind::Int8).unwrap(), Scalar::I8(5));
        assert_eq!(coerce("-32768", Kind::Int16).unwrap(), Scalar::I16(i16::MIN));
    }

    #[test]
    fn test_integer_bounds() {
        assert!(coerce("2147483648", Kind::Int32).is_err());
        assert_eq!(
            coerce("9223372036854775807", Kind::Int64).unwrap(),
            Scalar::I64(i64::MAX)
        );
        assert!(coerce("128", Kind::Int8).is_err());
    }

    #[test]
    fn test_unsigned_integers() {
        assert_eq!(coerce("0", Kind::Uint).unwrap(), Scalar::Usize(0));
        assert_eq!(coerce("1", Kind::Uint32).unwrap(), Scalar::U32(1));
        assert_eq!(
            coerce("18446744073709551615", Kind::Uint64).unwrap(),
            Scalar::U64(u64::MAX)
        );
        assert!(coerce("-1", Kind::Uint64).is_err());
        assert!(coerce("+1", Kind::Uint32).is_err());
        assert!(coerce("4294967296", Kind::Uint32).is_err());
        assert!(coerce("256", Kind::Uint8).is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(coerce("0.1", Kind::Float32).unwrap(), Scalar::F32(0.1));
        assert_eq!(coerce(".2", Kind::Float64).unwrap(), Scalar::F64(0.2));
        assert_eq!(coerce("1e3", Kind::Float64).unwrap(), Scalar::F64(1000.0));
        assert!(coerce("1,5", Kind::Float64).is_err());

        assert_eq!(
            coerce("1e39", Kind::Float32).unwrap_err(),
            CoerceError::Malformed {
                kind: Kind::Float32,
                value: "1e39".to_string(),
                reason: "value out of range".to_string(),
            }
        );
        assert!(coerce("-1e400", Kind::Float64).is_err());
        assert_eq!(
            coerce("3.4e38", Kind::Float32).unwrap(),
            Scalar::F32(3.4e38)
        );

        assert_eq!(coerce("inf", Kind::Float64).unwrap(), Scalar::F64(f64::INFINITY));
        assert_eq!(
            coerce("-Infinity", Kind::Float32).unwrap(),
            Scalar::F32(f32::NEG_INFINITY)
        );
        assert!(matches!(
            coerce("NaN", Kind::Float64).unwrap(),
            Scalar::F64(v) if v.is_nan()
        ));
    }

    #[test]
    fn test_bool_spellings() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(coerce(raw, Kind::Bool).unwrap(), Scalar::Bool(true), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(coerce(raw, Kind::Bool).unwrap(), Scalar::Bool(false), "{raw}");
        }
        assert!(coerce("yes", Kind::Bool).is_err());
        assert!(coerce("tRuE", Kind::Bool).is_err());
    }

    #[test]
    fn test_malformed_carries_value() {
        let err = coerce("abc", Kind::Int).unwrap_err();
        match err {
            CoerceError::Malformed { kind, value, .. } => {
                assert_eq!(kind, Kind::Int);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_kinds() {
        assert_eq!(
            coerce("a,b", Kind::Sequence).unwrap_err(),
            CoerceError::UnsupportedKind {
                kind: Kind::Sequence
            }
        );
        assert_eq!(
            coerce("a=b", Kind::Map).unwrap_err().to_string(),
            "Kind map not supported"
        );
    }
}
