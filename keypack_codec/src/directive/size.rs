use crate::directive::{Directive, TypeCode};
use crate::err::PackResult;
use crate::value::{mismatch, Value};
use crate::vint;

impl Directive {
    /// The count of bytes [`Directive::ser`] appends for `v`.
    ///
    /// Applies the same kind checks as `ser`, so a value that sizes
    /// successfully also encodes successfully.
    pub fn size_of(&self, v: &Value) -> PackResult<usize> {
        match self.type_code {
            TypeCode::Pad => Ok(self.size),
            TypeCode::FixedStr | TypeCode::NulStr => {
                let s = self.expect_str(v)?;
                if self.is_fixed_str() {
                    Ok(self.size)
                } else {
                    Ok(nul_str_len(s.as_bytes()))
                }
            }
            TypeCode::Blob | TypeCode::PrefixedBlob => {
                let b = self.expect_bytes(v)?;
                let body_len = self.blob_body_len(b);
                if self.type_code == TypeCode::PrefixedBlob {
                    Ok(vint::uint_size(body_len as u64) + body_len)
                } else {
                    Ok(body_len)
                }
            }
            TypeCode::I8 => self.expect_i8(v).map(|_| 1),
            TypeCode::U8 | TypeCode::Bitfield => self.expect_u8(v).map(|_| 1),
            TypeCode::Short | TypeCode::Int | TypeCode::Long | TypeCode::Quad => {
                let x = self.expect_signed(v)?;
                Ok(vint::int_size(x))
            }
            TypeCode::UShort
            | TypeCode::UInt
            | TypeCode::ULong
            | TypeCode::UQuad
            | TypeCode::Record => {
                let x = self.expect_unsigned(v)?;
                Ok(vint::uint_size(x))
            }
        }
    }

    /// `s` always, and `S` when a size was given.
    pub(super) fn is_fixed_str(&self) -> bool {
        self.type_code == TypeCode::FixedStr || self.has_size
    }

    /// A declared size overrides the provided length, by truncating or padding.
    pub(super) fn blob_body_len(&self, b: &[u8]) -> usize {
        if self.has_size {
            self.size
        } else {
            b.len()
        }
    }

    /* Kind checks, shared with the encoder. */

    pub(super) fn expect_str<'v>(&self, v: &'v Value) -> PackResult<&'v str> {
        match v {
            Value::Str(s) => Ok(s),
            _ => Err(self.mismatch("text", v)),
        }
    }
    pub(super) fn expect_bytes<'v>(&self, v: &'v Value) -> PackResult<&'v [u8]> {
        match v {
            Value::Bytes(b) => Ok(b),
            _ => Err(self.mismatch("bytes", v)),
        }
    }
    pub(super) fn expect_i8(&self, v: &Value) -> PackResult<i8> {
        match v {
            Value::I8(x) => Ok(*x),
            _ => Err(self.mismatch("an i8", v)),
        }
    }
    pub(super) fn expect_u8(&self, v: &Value) -> PackResult<u8> {
        match v {
            Value::U8(x) => Ok(*x),
            _ => Err(self.mismatch("a u8", v)),
        }
    }
    pub(super) fn expect_signed(&self, v: &Value) -> PackResult<i64> {
        v.as_signed()
            .ok_or_else(|| self.mismatch("a signed integer", v))
    }
    pub(super) fn expect_unsigned(&self, v: &Value) -> PackResult<u64> {
        v.as_unsigned()
            .ok_or_else(|| self.mismatch("an unsigned integer", v))
    }

    pub(super) fn mismatch(&self, expected: &str, v: &Value) -> crate::PackErr {
        let expected = format!("{} for '{}'", expected, self.type_code.letter());
        mismatch(&expected, v)
    }
}

/// Text stops at its first embedded NUL, which then serves as the terminator.
pub(crate) fn nul_str_len(s: &[u8]) -> usize {
    match s.iter().position(|b| *b == 0) {
        Some(nul_pos) => nul_pos + 1,
        None => s.len() + 1,
    }
}
