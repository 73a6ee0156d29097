//! Record encoding - serializing typed values against a message format.
//!
//! The encoder consumes one [`Value`] per column, in column order, and
//! produces a framed record in a caller-supplied buffer. It never
//! allocates; the writer reuses a single scratch buffer of
//! [`MAX_RECORD_LENGTH`](super::MAX_RECORD_LENGTH) bytes for all records.
//!
//! Integer values are narrowed to the column width on store, matching the
//! integer-promotion contract of the wire format: the caller passes full
//! width integers and only the low bytes of over-wide values reach the
//! stream.

use crate::error::{Result, SdlogError};
use crate::model::{ColumnType, MessageFormat};

use super::wire_format::{encode_record_header, RECORD_HEADER_SIZE};

/// One value to encode, paired positionally with a column.
///
/// `From` conversions exist for the common primitive types, so value lists
/// can be written as `&[1u8.into(), 2.5f32.into(), "name".into()]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Signed integer; accepted by all integer-backed columns.
    Int(i64),
    /// Unsigned integer; accepted by all integer-backed columns.
    Uint(u64),
    /// Single-precision float; accepted by `f` and `d` columns.
    F32(f32),
    /// Double-precision float; accepted by `d` and `f` columns (narrowed).
    F64(f64),
    /// String; accepted by `n`, `N` and `Z` columns, truncated to the
    /// field width.
    Str(&'a str),
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value<'_> {
            fn from(value: $ty) -> Self {
                Value::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! value_from_uint {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value<'_> {
            fn from(value: $ty) -> Self {
                Value::Uint(u64::from(value))
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64);
value_from_uint!(u8, u16, u32, u64);

impl From<f32> for Value<'_> {
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value<'_> {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Str(value)
    }
}

impl Value<'_> {
    /// Raw 64-bit pattern of an integer value; the low bytes of the
    /// pattern are what integer columns store.
    fn integer_bits(&self, ty: ColumnType) -> Result<u64> {
        match *self {
            Value::Int(v) => Ok(v as u64),
            Value::Uint(v) => Ok(v),
            _ => Err(mismatch(ty, self)),
        }
    }
}

fn mismatch(ty: ColumnType, value: &Value<'_>) -> SdlogError {
    SdlogError::invalid_value(format!(
        "value {value:?} is not representable in a column of type {:?}",
        ty.code()
    ))
}

/// Encode one record of `format` from `values` into `buf`.
///
/// On success returns the number of bytes written:
/// `RECORD_HEADER_SIZE + format.wire_size()`.
///
/// # Errors
///
/// - invalid-value if `values` does not hold exactly one compatible value
///   per column, or if `buf` is too small for the record;
/// - unimplemented if the format contains an `a` (int16 array) column.
pub fn encode_record(format: &MessageFormat, buf: &mut [u8], values: &[Value<'_>]) -> Result<usize> {
    if values.len() != format.column_count() {
        return Err(SdlogError::invalid_value(format!(
            "format {:?} has {} columns but {} values were supplied",
            format.name(),
            format.column_count(),
            values.len()
        )));
    }

    let total = RECORD_HEADER_SIZE + usize::from(format.wire_size());
    if buf.len() < total {
        return Err(SdlogError::invalid_value(format!(
            "record of format {:?} needs {total} bytes but the buffer holds {}",
            format.name(),
            buf.len()
        )));
    }

    encode_record_header(buf, format.id());

    let mut offset = RECORD_HEADER_SIZE;
    for (column, value) in format.columns().zip(values) {
        offset += encode_value(column.ty(), value, &mut buf[offset..])?;
    }

    debug_assert_eq!(offset, total);
    Ok(offset)
}

/// Encode a single value of type `ty` into the front of `out`, returning
/// the number of bytes written.
fn encode_value(ty: ColumnType, value: &Value<'_>, out: &mut [u8]) -> Result<usize> {
    match ty {
        ColumnType::Int8 | ColumnType::UInt8 | ColumnType::FlightMode => {
            store_integer(out, value.integer_bits(ty)?, 1)
        }
        ColumnType::Int16 | ColumnType::UInt16 | ColumnType::Fixed16 | ColumnType::UFixed16 => {
            store_integer(out, value.integer_bits(ty)?, 2)
        }
        ColumnType::Int32
        | ColumnType::UInt32
        | ColumnType::Fixed32
        | ColumnType::UFixed32
        | ColumnType::Coordinate => store_integer(out, value.integer_bits(ty)?, 4),
        ColumnType::Int64 | ColumnType::UInt64 => store_integer(out, value.integer_bits(ty)?, 8),
        ColumnType::Float => {
            let v = match *value {
                Value::F32(v) => v,
                Value::F64(v) => v as f32,
                _ => return Err(mismatch(ty, value)),
            };
            out[..4].copy_from_slice(&v.to_le_bytes());
            Ok(4)
        }
        ColumnType::Double => {
            let v = match *value {
                Value::F64(v) => v,
                Value::F32(v) => f64::from(v),
                _ => return Err(mismatch(ty, value)),
            };
            out[..8].copy_from_slice(&v.to_le_bytes());
            Ok(8)
        }
        ColumnType::String4 | ColumnType::String16 | ColumnType::String64 => {
            let Value::Str(s) = value else {
                return Err(mismatch(ty, value));
            };
            let width = ty.wire_size();
            let bytes = s.as_bytes();
            let copied = bytes.len().min(width);
            out[..width].fill(0);
            out[..copied].copy_from_slice(&bytes[..copied]);
            Ok(width)
        }
        ColumnType::Int16Array => Err(SdlogError::Unimplemented(
            "encoding of int16 array columns",
        )),
    }
}

/// Store the low `width` bytes of `bits`, little-endian.
#[inline]
fn store_integer(out: &mut [u8], bits: u64, width: usize) -> Result<usize> {
    out[..width].copy_from_slice(&bits.to_le_bytes()[..width]);
    Ok(width)
}
