use crate::err::{invalid, PackResult};
use derive_more::{Display, From};
use num_traits::FromPrimitive;
use std::any;

/// A value the codec knows how to pack.
///
/// When unpacking, a `Value` is also the destination slot: its variant names the
/// kind the caller wants, and the decoder overwrites its content.
#[derive(PartialEq, Eq, Clone, Debug, From)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Str(String),
    Bytes(Vec<u8>),
    Seq(Seq),
}

/// A homogeneous sequence. Only the value-driven API packs sequences.
#[derive(PartialEq, Eq, Clone, Debug, From)]
pub enum Seq {
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    Str(Vec<String>),
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Display)]
pub enum ValueKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Str,
    Bytes,
    Seq,
}
impl From<&Value> for ValueKind {
    fn from(v: &Value) -> Self {
        match v {
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::U8(_) => ValueKind::U8,
            Value::U16(_) => ValueKind::U16,
            Value::U32(_) => ValueKind::U32,
            Value::U64(_) => ValueKind::U64,
            Value::Str(_) => ValueKind::Str,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Seq(_) => ValueKind::Seq,
        }
    }
}

/* Constructors beyond the derived ones. */
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(String::from(s))
    }
}
impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

/* Scalar access. */
impl Value {
    pub fn kind(&self) -> ValueKind {
        ValueKind::from(self)
    }

    /// Any signed scalar, widened.
    pub fn as_signed(&self) -> Option<i64> {
        match self {
            Value::I8(x) => Some(i64::from(*x)),
            Value::I16(x) => Some(i64::from(*x)),
            Value::I32(x) => Some(i64::from(*x)),
            Value::I64(x) => Some(*x),
            _ => None,
        }
    }

    /// Any unsigned scalar, widened.
    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            Value::U8(x) => Some(u64::from(*x)),
            Value::U16(x) => Some(u64::from(*x)),
            Value::U32(x) => Some(u64::from(*x)),
            Value::U64(x) => Some(*x),
            _ => None,
        }
    }

    /// Stores a decoded signed integer, narrowed to this slot's width.
    pub fn set_signed(&mut self, x: i64) -> PackResult<()> {
        match self {
            Value::I8(dst) => *dst = narrow_signed(x)?,
            Value::I16(dst) => *dst = narrow_signed(x)?,
            Value::I32(dst) => *dst = narrow_signed(x)?,
            Value::I64(dst) => *dst = x,
            _ => return Err(mismatch("a signed integer", self)),
        }
        Ok(())
    }

    /// Stores a decoded unsigned integer, narrowed to this slot's width.
    pub fn set_unsigned(&mut self, x: u64) -> PackResult<()> {
        match self {
            Value::U8(dst) => *dst = narrow_unsigned(x)?,
            Value::U16(dst) => *dst = narrow_unsigned(x)?,
            Value::U32(dst) => *dst = narrow_unsigned(x)?,
            Value::U64(dst) => *dst = x,
            _ => return Err(mismatch("an unsigned integer", self)),
        }
        Ok(())
    }
}

pub(crate) fn narrow_signed<T: FromPrimitive>(x: i64) -> PackResult<T> {
    T::from_i64(x).ok_or_else(|| invalid!("{} does not fit {}.", x, any::type_name::<T>()))
}
pub(crate) fn narrow_unsigned<T: FromPrimitive>(x: u64) -> PackResult<T> {
    T::from_u64(x).ok_or_else(|| invalid!("{} does not fit {}.", x, any::type_name::<T>()))
}

pub(crate) fn mismatch(expected: &str, actual: &Value) -> crate::PackErr {
    invalid!("Expected {}, found {}.", expected, actual.kind())
}
