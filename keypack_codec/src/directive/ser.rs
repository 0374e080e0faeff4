use crate::directive::{size::nul_str_len, Directive, TypeCode};
use crate::err::PackResult;
use crate::value::Value;
use crate::vint;

/// The single byte stored for an `i8`: the value with its sign bit flipped,
/// so that bytewise order matches numeric order.
pub(crate) fn i8_to_byte(x: i8) -> u8 {
    (x as u8) ^ 0x80
}

impl Directive {
    /// Appends the encoding of `v`. `Pad` ignores `v`.
    ///
    /// On a kind mismatch nothing is appended.
    pub fn ser(&self, buf: &mut Vec<u8>, v: &Value) -> PackResult<()> {
        match self.type_code {
            TypeCode::Pad => self.ser_pad(buf),
            TypeCode::FixedStr | TypeCode::NulStr => {
                let s = self.expect_str(v)?.as_bytes();
                if self.is_fixed_str() {
                    ser_padded(buf, s, self.size);
                } else {
                    ser_nul_str(buf, s);
                }
            }
            TypeCode::Blob | TypeCode::PrefixedBlob => {
                let b = self.expect_bytes(v)?;
                let body_len = self.blob_body_len(b);
                if self.type_code == TypeCode::PrefixedBlob {
                    vint::pack_uint(buf, body_len as u64);
                }
                ser_padded(buf, b, body_len);
            }
            TypeCode::I8 => buf.push(i8_to_byte(self.expect_i8(v)?)),
            TypeCode::U8 | TypeCode::Bitfield => buf.push(self.expect_u8(v)?),
            TypeCode::Short | TypeCode::Int | TypeCode::Long | TypeCode::Quad => {
                vint::pack_int(buf, self.expect_signed(v)?);
            }
            TypeCode::UShort
            | TypeCode::UInt
            | TypeCode::ULong
            | TypeCode::UQuad
            | TypeCode::Record => {
                vint::pack_uint(buf, self.expect_unsigned(v)?);
            }
        }
        Ok(())
    }

    pub fn ser_pad(&self, buf: &mut Vec<u8>) {
        buf.resize(buf.len() + self.size, 0);
    }
}

/// Writes exactly `len` bytes: `src` truncated, or `src` followed by zeros.
fn ser_padded(buf: &mut Vec<u8>, src: &[u8], len: usize) {
    if src.len() >= len {
        buf.extend_from_slice(&src[..len]);
    } else {
        buf.extend_from_slice(src);
        buf.resize(buf.len() + (len - src.len()), 0);
    }
}

pub(crate) fn ser_nul_str(buf: &mut Vec<u8>, s: &[u8]) {
    let len = nul_str_len(s);
    if len <= s.len() {
        buf.extend_from_slice(&s[..len]);
    } else {
        buf.extend_from_slice(s);
        buf.push(0);
    }
}
