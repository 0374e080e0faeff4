//! # Value-driven packing
//!
//! No format string: each value's kind decides its wire shape.
//!
//! ```text
//! Str            text bytes, NUL-terminated (cut at an embedded NUL)
//! Bytes          varint length, then the bytes
//! I8             one byte, sign bit flipped
//! U8             one byte
//! I16 ..= I64    signed varint
//! U16 ..= U64    unsigned varint
//! Seq            varint element count, then the elements back to back
//! ```
//!
//! The *last* value is unbounded: a trailing `Bytes` or `Seq` omits its length
//! or count, and unpacking reads it to the end of the input. Consequently the
//! destinations passed to [`unpack_values`] must mirror the values passed to
//! [`pack_values`] one-to-one, including which one is last.

use crate::cursor::ByteCursor;
use crate::directive::{byte_to_i8, deser_text, i8_to_byte, nul_str_len, ser_nul_str};
use crate::err::{invalid, PackResult};
use crate::value::{narrow_signed, narrow_unsigned, Seq, Value};
use crate::vint;
use itertools::{Itertools, Position};
use tracing::trace;


/// Packs `vals` by kind. The last value, if `Bytes` or `Seq`, is unprefixed.
pub fn pack_values(vals: &[Value]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(values_size(vals));
    for pos in vals.iter().with_position() {
        let (v, is_last) = split_position(pos);
        ser_value(&mut buf, v, is_last);
    }
    buf
}

/// The length [`pack_values`] produces for `vals`.
pub fn values_size(vals: &[Value]) -> usize {
    vals.iter()
        .with_position()
        .map(|pos| {
            let (v, is_last) = split_position(pos);
            value_size(v, is_last)
        })
        .sum()
}

/// Unpacks `bytes` into `dsts`, whose variants select the kinds to decode.
///
/// An empty input is not an error and leaves `dsts` untouched. A `Seq`
/// destination is overwritten, not appended to.
pub fn unpack_values(bytes: &[u8], dsts: &mut [Value]) -> PackResult<()> {
    if bytes.is_empty() {
        return Ok(());
    }

    let mut r = ByteCursor::new(bytes);
    let dsts_ct = dsts.len();
    for (i, dst) in dsts.iter_mut().enumerate() {
        let is_last = i + 1 == dsts_ct;
        if let Err(e) = deser_value(&mut r, dst, is_last) {
            trace!(dst_idx = i, offset = r.pos(), err = %e, "unpack_values failed");
            return Err(e);
        }
    }
    Ok(())
}

fn split_position<T>(pos: Position<T>) -> (T, bool) {
    match pos {
        Position::First(t) | Position::Middle(t) => (t, false),
        Position::Last(t) | Position::Only(t) => (t, true),
    }
}

/* Size. */

fn value_size(v: &Value, is_last: bool) -> usize {
    match v {
        Value::Str(s) => nul_str_len(s.as_bytes()),
        Value::Bytes(b) => count_prefix_size(b.len(), is_last) + b.len(),
        Value::I8(_) | Value::U8(_) => 1,
        Value::I16(x) => vint::int_size(i64::from(*x)),
        Value::I32(x) => vint::int_size(i64::from(*x)),
        Value::I64(x) => vint::int_size(*x),
        Value::U16(x) => vint::uint_size(u64::from(*x)),
        Value::U32(x) => vint::uint_size(u64::from(*x)),
        Value::U64(x) => vint::uint_size(*x),
        Value::Seq(seq) => match seq {
            Seq::I16(xs) => seq_size(xs, is_last, |x| vint::int_size(i64::from(*x))),
            Seq::I32(xs) => seq_size(xs, is_last, |x| vint::int_size(i64::from(*x))),
            Seq::I64(xs) => seq_size(xs, is_last, |x| vint::int_size(*x)),
            Seq::U16(xs) => seq_size(xs, is_last, |x| vint::uint_size(u64::from(*x))),
            Seq::U32(xs) => seq_size(xs, is_last, |x| vint::uint_size(u64::from(*x))),
            Seq::U64(xs) => seq_size(xs, is_last, |x| vint::uint_size(*x)),
            Seq::Str(ss) => seq_size(ss, is_last, |s| nul_str_len(s.as_bytes())),
        },
    }
}

fn seq_size<T>(elems: &[T], is_last: bool, elem_size: impl Fn(&T) -> usize) -> usize {
    count_prefix_size(elems.len(), is_last) + elems.iter().map(elem_size).sum::<usize>()
}

fn count_prefix_size(len: usize, is_last: bool) -> usize {
    if is_last {
        0
    } else {
        vint::uint_size(len as u64)
    }
}

/* Encoding. */

fn ser_value(buf: &mut Vec<u8>, v: &Value, is_last: bool) {
    match v {
        Value::Str(s) => ser_nul_str(buf, s.as_bytes()),
        Value::Bytes(b) => {
            ser_count_prefix(buf, b.len(), is_last);
            buf.extend_from_slice(b);
        }
        Value::I8(x) => buf.push(i8_to_byte(*x)),
        Value::U8(x) => buf.push(*x),
        Value::I16(x) => vint::pack_int(buf, i64::from(*x)),
        Value::I32(x) => vint::pack_int(buf, i64::from(*x)),
        Value::I64(x) => vint::pack_int(buf, *x),
        Value::U16(x) => vint::pack_uint(buf, u64::from(*x)),
        Value::U32(x) => vint::pack_uint(buf, u64::from(*x)),
        Value::U64(x) => vint::pack_uint(buf, *x),
        Value::Seq(seq) => match seq {
            Seq::I16(xs) => {
                ser_elems(buf, xs, is_last, |buf, x| vint::pack_int(buf, i64::from(*x)))
            }
            Seq::I32(xs) => {
                ser_elems(buf, xs, is_last, |buf, x| vint::pack_int(buf, i64::from(*x)))
            }
            Seq::I64(xs) => ser_elems(buf, xs, is_last, |buf, x| vint::pack_int(buf, *x)),
            Seq::U16(xs) => {
                ser_elems(buf, xs, is_last, |buf, x| vint::pack_uint(buf, u64::from(*x)))
            }
            Seq::U32(xs) => {
                ser_elems(buf, xs, is_last, |buf, x| vint::pack_uint(buf, u64::from(*x)))
            }
            Seq::U64(xs) => ser_elems(buf, xs, is_last, |buf, x| vint::pack_uint(buf, *x)),
            Seq::Str(ss) => ser_elems(buf, ss, is_last, |buf, s| ser_nul_str(buf, s.as_bytes())),
        },
    }
}

fn ser_count_prefix(buf: &mut Vec<u8>, len: usize, is_last: bool) {
    if !is_last {
        vint::pack_uint(buf, len as u64);
    }
}

fn ser_elems<T>(
    buf: &mut Vec<u8>,
    elems: &[T],
    is_last: bool,
    mut ser_elem: impl FnMut(&mut Vec<u8>, &T),
) {
    ser_count_prefix(buf, elems.len(), is_last);
    for elem in elems {
        ser_elem(buf, elem);
    }
}

/* Decoding. */

fn deser_value(r: &mut ByteCursor, dst: &mut Value, is_last: bool) -> PackResult<()> {
    match dst {
        Value::Str(s) => *s = deser_nul_str(r)?,
        Value::Bytes(b) => {
            let bytes = if is_last {
                r.take_rest()
            } else {
                let len = deser_count_prefix(r)?;
                r.take(len)?
            };
            b.clear();
            b.extend_from_slice(bytes);
        }
        Value::I8(x) => *x = byte_to_i8(r.take_byte()?),
        Value::U8(x) => *x = r.take_byte()?,
        Value::I16(_) | Value::I32(_) | Value::I64(_) => {
            let x = vint::unpack_int(r)?;
            dst.set_signed(x)?;
        }
        Value::U16(_) | Value::U32(_) | Value::U64(_) => {
            let x = vint::unpack_uint(r)?;
            dst.set_unsigned(x)?;
        }
        Value::Seq(seq) => match seq {
            Seq::I16(xs) => deser_elems(r, xs, is_last, deser_narrow_int)?,
            Seq::I32(xs) => deser_elems(r, xs, is_last, deser_narrow_int)?,
            Seq::I64(xs) => deser_elems(r, xs, is_last, vint::unpack_int)?,
            Seq::U16(xs) => deser_elems(r, xs, is_last, deser_narrow_uint)?,
            Seq::U32(xs) => deser_elems(r, xs, is_last, deser_narrow_uint)?,
            Seq::U64(xs) => deser_elems(r, xs, is_last, vint::unpack_uint)?,
            Seq::Str(ss) => deser_elems(r, ss, is_last, deser_nul_str)?,
        },
    }
    Ok(())
}

fn deser_nul_str(r: &mut ByteCursor) -> PackResult<String> {
    deser_text(r.take_nul_terminated()?)
}

fn deser_narrow_int<T: num_traits::FromPrimitive>(r: &mut ByteCursor) -> PackResult<T> {
    narrow_signed(vint::unpack_int(r)?)
}
fn deser_narrow_uint<T: num_traits::FromPrimitive>(r: &mut ByteCursor) -> PackResult<T> {
    narrow_unsigned(vint::unpack_uint(r)?)
}

fn deser_count_prefix(r: &mut ByteCursor) -> PackResult<usize> {
    let len = vint::unpack_uint(r)?;
    usize::try_from(len).map_err(|_| invalid!("Length {} overflows usize.", len))
}

/// A prefixed sequence reads exactly its count; a last sequence reads until
/// the input is exhausted.
fn deser_elems<T>(
    r: &mut ByteCursor,
    dst: &mut Vec<T>,
    is_last: bool,
    mut deser_elem: impl FnMut(&mut ByteCursor) -> PackResult<T>,
) -> PackResult<()> {
    dst.clear();
    if is_last {
        while !r.is_exhausted() {
            dst.push(deser_elem(r)?);
        }
    } else {
        let count = deser_count_prefix(r)?;
        dst.reserve(count.min(r.remaining()));
        for _ in 0..count {
            dst.push(deser_elem(r)?);
        }
    }
    Ok(())
}
