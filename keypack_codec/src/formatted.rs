use crate::cursor::ByteCursor;
use crate::directive::{DirectiveParser, ParseResult, TypeCode};
use crate::err::{invalid, PackResult};
use crate::value::Value;
use tracing::trace;

mod test;

/// Packs `vals` under the format string `fmt`. See [`crate::directive`] for
/// the format grammar.
///
/// Each non-padding directive consumes the next value. Values left over once
/// the format is exhausted are ignored.
pub fn pack_formatted(fmt: &str, vals: &[Value]) -> PackResult<Vec<u8>> {
    let mut buf = vec![];
    pack_formatted_into(fmt, &mut buf, vals)?;
    Ok(buf)
}

/// Same as [`pack_formatted`], writing into a caller-owned buffer.
///
/// `buf` is cleared first. On error `buf` is left empty.
pub fn pack_formatted_into(fmt: &str, buf: &mut Vec<u8>, vals: &[Value]) -> PackResult<()> {
    buf.clear();
    let res = pack_formatted_(fmt, buf, vals);
    if let Err(e) = &res {
        trace!(format = fmt, vals_ct = vals.len(), err = %e, "pack_formatted failed");
        buf.clear();
    }
    res
}

fn pack_formatted_(fmt: &str, buf: &mut Vec<u8>, vals: &[Value]) -> PackResult<()> {
    let mut parser = DirectiveParser::start(fmt)?;

    let tot_len = size_pass(&mut parser, vals)?;
    buf.try_reserve(tot_len)
        .map_err(|e| invalid!("Cannot reserve {} bytes. {}", tot_len, e))?;

    parser.reset();
    let mut vals = vals.iter();
    while let ParseResult::Some(dir) = parser.advance()? {
        if dir.type_code == TypeCode::Pad {
            dir.ser_pad(buf);
            continue;
        }
        let v = vals
            .next()
            .ok_or_else(|| invalid!("Format {:?} needs more values.", fmt))?;
        dir.ser(buf, v)?;
    }

    debug_assert_eq!(tot_len, buf.len());
    Ok(())
}

/// The length [`pack_formatted`] would produce, without encoding anything.
pub fn packed_size(fmt: &str, vals: &[Value]) -> PackResult<usize> {
    let mut parser = DirectiveParser::start(fmt)?;
    size_pass(&mut parser, vals)
}

fn size_pass(parser: &mut DirectiveParser, vals: &[Value]) -> PackResult<usize> {
    let mut tot_len: usize = 0;
    let mut vals = vals.iter();
    while let ParseResult::Some(dir) = parser.advance()? {
        let dir_len = if dir.type_code == TypeCode::Pad {
            dir.size
        } else {
            let v = vals
                .next()
                .ok_or_else(|| invalid!("Format needs more values."))?;
            dir.size_of(v)?
        };
        tot_len = tot_len
            .checked_add(dir_len)
            .ok_or_else(|| invalid!("Packed size overflows usize."))?;
    }
    Ok(tot_len)
}

/// Unpacks `bytes` under the format string `fmt` into `dsts`.
///
/// The variant of each destination selects the kind to decode into. On error,
/// destinations filled by earlier directives keep their new content, and the
/// rest are unspecified.
pub fn unpack_formatted(fmt: &str, bytes: &[u8], dsts: &mut [Value]) -> PackResult<()> {
    let res = unpack_formatted_(fmt, bytes, dsts);
    if let Err(e) = &res {
        trace!(format = fmt, bytes_len = bytes.len(), err = %e, "unpack_formatted failed");
    }
    res
}

fn unpack_formatted_(fmt: &str, bytes: &[u8], dsts: &mut [Value]) -> PackResult<()> {
    if bytes.is_empty() {
        return Err(invalid!("Nothing to unpack."));
    }

    let mut parser = DirectiveParser::start(fmt)?;
    let mut r = ByteCursor::new(bytes);
    let mut dsts = dsts.iter_mut();
    while let ParseResult::Some(dir) = parser.advance()? {
        if dir.type_code == TypeCode::Pad {
            dir.skip_pad(&mut r)?;
            continue;
        }
        let dst = dsts
            .next()
            .ok_or_else(|| invalid!("Format {:?} needs more destinations.", fmt))?;
        dir.deser(&mut r, dst)?;
    }
    Ok(())
}
