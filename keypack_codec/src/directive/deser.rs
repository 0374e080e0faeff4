use crate::cursor::ByteCursor;
use crate::directive::{Directive, TypeCode};
use crate::err::{invalid, PackResult};
use crate::value::Value;
use crate::vint;
use std::str;

pub(crate) fn byte_to_i8(b: u8) -> i8 {
    (b ^ 0x80) as i8
}

pub(crate) fn deser_text(bytes: &[u8]) -> PackResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| invalid!("Text is not UTF-8. {}", e))
}

/// Encoding truncates fixed-width text by bytes, which may cut the last
/// character short. That incomplete tail is dropped.
fn deser_fixed_text(bytes: &[u8]) -> PackResult<String> {
    match str::from_utf8(bytes) {
        Ok(s) => Ok(String::from(s)),
        Err(e) if e.error_len().is_none() => deser_text(&bytes[..e.valid_up_to()]),
        Err(e) => Err(invalid!("Text is not UTF-8. {}", e)),
    }
}

impl Directive {
    /// Reads one occurrence into `dst`, whose variant selects the wanted kind.
    /// `Pad` ignores `dst`.
    pub fn deser(&self, r: &mut ByteCursor, dst: &mut Value) -> PackResult<()> {
        match self.type_code {
            TypeCode::Pad => self.skip_pad(r)?,
            TypeCode::FixedStr | TypeCode::NulStr => {
                let Value::Str(s) = dst else {
                    return Err(self.mismatch("a text destination", dst));
                };
                *s = if self.is_fixed_str() {
                    deser_fixed_text(r.take(self.size)?)?
                } else {
                    deser_text(r.take_nul_terminated()?)?
                };
            }
            TypeCode::Blob | TypeCode::PrefixedBlob => {
                let Value::Bytes(b) = dst else {
                    return Err(self.mismatch("a bytes destination", dst));
                };
                let bytes = if self.has_size {
                    r.take(self.size)?
                } else if self.type_code == TypeCode::PrefixedBlob {
                    let len = vint::unpack_uint(r)?;
                    let len = usize::try_from(len)
                        .map_err(|_| invalid!("Blob length {} overflows usize.", len))?;
                    r.take(len)?
                } else {
                    r.take_rest()
                };
                b.clear();
                b.extend_from_slice(bytes);
            }
            TypeCode::I8 => {
                let Value::I8(x) = dst else {
                    return Err(self.mismatch("an i8 destination", dst));
                };
                *x = byte_to_i8(r.take_byte()?);
            }
            TypeCode::U8 | TypeCode::Bitfield => {
                let Value::U8(x) = dst else {
                    return Err(self.mismatch("a u8 destination", dst));
                };
                *x = r.take_byte()?;
            }
            TypeCode::Short | TypeCode::Int | TypeCode::Long | TypeCode::Quad => {
                if dst.as_signed().is_none() {
                    return Err(self.mismatch("a signed destination", dst));
                }
                let x = vint::unpack_int(r)?;
                dst.set_signed(x)?;
            }
            TypeCode::UShort
            | TypeCode::UInt
            | TypeCode::ULong
            | TypeCode::UQuad
            | TypeCode::Record => {
                if dst.as_unsigned().is_none() {
                    return Err(self.mismatch("an unsigned destination", dst));
                }
                let x = vint::unpack_uint(r)?;
                dst.set_unsigned(x)?;
            }
        }
        Ok(())
    }

    pub fn skip_pad(&self, r: &mut ByteCursor) -> PackResult<()> {
        r.take(self.size)?;
        Ok(())
    }
}
