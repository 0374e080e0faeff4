//! # Order-preserving variable-length integers
//!
//! The first byte carries a marker, which classifies the value into a range.
//! Marker ranges are laid out in numeric order, and within a range the payload
//! is big-endian, so comparing encodings bytewise compares the numbers.
//!
//! ```text
//! marker          value range              payload
//! 0x10 | lz       x < -8256                (8 - lz) low bytes of x; lz = leading 0xff bytes
//! 0x20 ..= 0x3f   -8256 <= x < -64         13 bits of (x + 8256)
//! 0x40 ..= 0x7f   -64 <= x < 0             6 bits of (x + 64)
//! 0x80 ..= 0xbf   0 <= x <= 63             6 bits of x
//! 0xc0 ..= 0xdf   64 <= x <= 8255          13 bits of (x - 64)
//! 0xe0 | len      8256 <= x                len bytes of (x - 8256)
//! ```
//!
//! Signed non-negative values share the unsigned layout.
//!
//! The unsigned value 8256 would fit in the bare marker `0xe0`; it is written as
//! `0xe1 0x00` instead, so that a larger value never has a shorter encoding.

use crate::cursor::ByteCursor;
use crate::err::{invalid, PackResult};
use std::mem;


const NEG_MULTI_MARKER: u8 = 0x10;
const NEG_2BYTE_MARKER: u8 = 0x20;
const NEG_1BYTE_MARKER: u8 = 0x40;
const POS_1BYTE_MARKER: u8 = 0x80;
const POS_2BYTE_MARKER: u8 = 0xc0;
const POS_MULTI_MARKER: u8 = 0xe0;

const NEG_1BYTE_MIN: i64 = -(1 << 6);
const NEG_2BYTE_MIN: i64 = -(1 << 13) + NEG_1BYTE_MIN;
const POS_1BYTE_MAX: u64 = (1 << 6) - 1;
const POS_2BYTE_MAX: u64 = (1 << 13) + POS_1BYTE_MAX;

const WORD_LEN: usize = mem::size_of::<u64>();

/* Size. */

pub fn uint_size(x: u64) -> usize {
    if x <= POS_1BYTE_MAX {
        1
    } else if x <= POS_2BYTE_MAX + 1 {
        2
    } else {
        posint_size(x - (POS_2BYTE_MAX + 1))
    }
}

pub fn int_size(x: i64) -> usize {
    if x < NEG_2BYTE_MIN {
        negint_size(x as u64)
    } else if x < NEG_1BYTE_MIN {
        2
    } else if x < 0 {
        1
    } else {
        uint_size(x as u64)
    }
}

fn posint_size(x: u64) -> usize {
    1 + WORD_LEN - leading_zero_bytes(x)
}
fn negint_size(x: u64) -> usize {
    1 + WORD_LEN - leading_zero_bytes(!x)
}

fn leading_zero_bytes(x: u64) -> usize {
    x.leading_zeros() as usize / 8
}

/* Encoding. */

pub fn pack_uint(buf: &mut Vec<u8>, x: u64) {
    if x <= POS_1BYTE_MAX {
        buf.push(POS_1BYTE_MARKER | (x as u8 & 0x3f));
    } else if x <= POS_2BYTE_MAX {
        let x = x - (POS_1BYTE_MAX + 1);
        buf.push(POS_2BYTE_MARKER | ((x >> 8) as u8 & 0x1f));
        buf.push(x as u8);
    } else if x == POS_2BYTE_MAX + 1 {
        buf.push(POS_MULTI_MARKER | 0x01);
        buf.push(0);
    } else {
        pack_posint(buf, x - (POS_2BYTE_MAX + 1));
    }
}

pub fn pack_int(buf: &mut Vec<u8>, x: i64) {
    if x < NEG_2BYTE_MIN {
        pack_negint(buf, x as u64);
    } else if x < NEG_1BYTE_MIN {
        let x = (x - NEG_2BYTE_MIN) as u64;
        buf.push(NEG_2BYTE_MARKER | ((x >> 8) as u8 & 0x1f));
        buf.push(x as u8);
    } else if x < 0 {
        let x = (x - NEG_1BYTE_MIN) as u64;
        buf.push(NEG_1BYTE_MARKER | (x as u8 & 0x3f));
    } else {
        pack_uint(buf, x as u64);
    }
}

fn pack_posint(buf: &mut Vec<u8>, x: u64) {
    let lz = leading_zero_bytes(x);
    let len = WORD_LEN - lz;
    buf.push(POS_MULTI_MARKER | len as u8);
    buf.extend_from_slice(&x.to_be_bytes()[lz..]);
}

/// The marker stores the count of elided leading `0xff` bytes rather than the
/// payload length, so that values of larger magnitude get smaller markers.
fn pack_negint(buf: &mut Vec<u8>, x: u64) {
    let lz = leading_zero_bytes(!x);
    buf.push(NEG_MULTI_MARKER | lz as u8);
    buf.extend_from_slice(&x.to_be_bytes()[lz..]);
}

/* Decoding. */

pub fn unpack_uint(r: &mut ByteCursor) -> PackResult<u64> {
    let marker = r.take_byte()?;
    unpack_uint_body(r, marker)
}

pub fn unpack_int(r: &mut ByteCursor) -> PackResult<i64> {
    let marker = r.take_byte()?;
    match marker & 0xf0 {
        NEG_MULTI_MARKER => {
            let x = unpack_negint(r, marker)?;
            Ok(x as i64)
        }
        0x20 | 0x30 => {
            let lo = r.take_byte()?;
            let x = (i64::from(marker & 0x1f) << 8) | i64::from(lo);
            Ok(NEG_2BYTE_MIN + x)
        }
        0x40 | 0x50 | 0x60 | 0x70 => Ok(NEG_1BYTE_MIN + i64::from(marker & 0x3f)),
        _ => {
            let x = unpack_uint_body(r, marker)?;
            i64::try_from(x).map_err(|_| invalid!("Signed varint {} exceeds i64::MAX.", x))
        }
    }
}

fn unpack_uint_body(r: &mut ByteCursor, marker: u8) -> PackResult<u64> {
    match marker & 0xf0 {
        0x80 | 0x90 | 0xa0 | 0xb0 => Ok(u64::from(marker & 0x3f)),
        0xc0 | 0xd0 => {
            let lo = r.take_byte()?;
            let x = (u64::from(marker & 0x1f) << 8) | u64::from(lo);
            Ok(x + POS_1BYTE_MAX + 1)
        }
        POS_MULTI_MARKER => {
            let x = unpack_posint(r, marker)?;
            x.checked_add(POS_2BYTE_MAX + 1)
                .ok_or_else(|| invalid!("Unsigned varint overflows u64."))
        }
        _ => Err(invalid!("Unknown varint marker {:#04x}.", marker)),
    }
}

fn unpack_posint(r: &mut ByteCursor, marker: u8) -> PackResult<u64> {
    let len = (marker & 0x0f) as usize;
    if len > WORD_LEN {
        return Err(invalid!("Varint length {} exceeds {}.", len, WORD_LEN));
    }
    let bytes = r.take(len)?;
    let x = bytes.iter().fold(0u64, |x, b| (x << 8) | u64::from(*b));
    Ok(x)
}

fn unpack_negint(r: &mut ByteCursor, marker: u8) -> PackResult<u64> {
    let lz = (marker & 0x0f) as usize;
    if lz > WORD_LEN {
        return Err(invalid!("Varint leading byte count {} exceeds {}.", lz, WORD_LEN));
    }
    let bytes = r.take(WORD_LEN - lz)?;
    let x = bytes.iter().fold(u64::MAX, |x, b| (x << 8) | u64::from(*b));
    Ok(x)
}
