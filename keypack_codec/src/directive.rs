//! # Format strings
//!
//! A format string is a sequence of directives, each an optional decimal size
//! followed by a type letter.
//!
//! ```text
//! format    := ['.'] directive*
//! directive := [digits] letter
//! ```
//!
//! | letter | meaning | value kind |
//! |---|---|---|
//! | `x` | `size` zero bytes of padding | none |
//! | `s` | text of exactly `size` bytes, truncated or zero-padded | `Str` |
//! | `S` | NUL-terminated text; with a size, same as `s` | `Str` |
//! | `t` | bitfield byte, `size` in 1..=8 bits | `U8` |
//! | `b` / `B` | signed / unsigned byte | `I8` / `U8` |
//! | `h i l q` | signed varint | any signed integer |
//! | `H I L Q r` | unsigned varint | any unsigned integer |
//! | `u` | raw bytes of exactly `size`, or the rest of the buffer | `Bytes` |
//! | `U` | raw bytes prefixed by their varint length | `Bytes` |
//!
//! For the numeric letters the size is a repeat count: `3i` is `iii`, and `0i`
//! is nothing at all. An unsized `u` that is not the last directive is read as
//! `U`, since only the last directive may run to the end of the buffer.
//!
//! Byte-order and alignment prefixes (`@`, `<`, `>`) are not supported.

use crate::err::{invalid, PackResult};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

mod deser;
mod ser;
mod size;

pub(crate) use deser::{byte_to_i8, deser_text};
pub(crate) use ser::{i8_to_byte, ser_nul_str};
pub(crate) use size::nul_str_len;

#[repr(u8)]
#[derive(PartialEq, Eq, Clone, Copy, FromPrimitive, Debug)]
pub enum TypeCode {
    Pad = b'x',
    FixedStr = b's',
    NulStr = b'S',
    Bitfield = b't',
    I8 = b'b',
    U8 = b'B',
    Short = b'h',
    UShort = b'H',
    Int = b'i',
    UInt = b'I',
    Long = b'l',
    ULong = b'L',
    Quad = b'q',
    UQuad = b'Q',
    Record = b'r',
    Blob = b'u',
    PrefixedBlob = b'U',
}
impl TypeCode {
    pub fn letter(&self) -> char {
        char::from(*self as u8)
    }
    pub fn is_signed_vint(&self) -> bool {
        matches!(self, Self::Short | Self::Int | Self::Long | Self::Quad)
    }
    pub fn is_unsigned_vint(&self) -> bool {
        matches!(
            self,
            Self::UShort | Self::UInt | Self::ULong | Self::UQuad | Self::Record
        )
    }
}

/// One parsed unit of a format string.
///
/// `size` is meaningful for padding, text and blobs. `has_size` records
/// whether the size was written out in the format string, as opposed to
/// defaulting to 1.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Directive {
    pub type_code: TypeCode,
    pub size: usize,
    pub has_size: bool,
}

#[derive(PartialEq, Eq, Debug)]
pub enum ParseResult {
    Exhausted,
    Some(Directive),
}

/// Walks a format string one directive at a time.
///
/// A parser is single-use per pass. [`DirectiveParser::reset`] rewinds it for
/// a second pass, but does not clear a pending repeat count; a pass that ran
/// to [`ParseResult::Exhausted`] never leaves one behind.
pub struct DirectiveParser<'f> {
    fmt: &'f [u8],
    first_idx: usize,
    idx: usize,
    repeats: usize,
    curr: Directive,
}

impl<'f> DirectiveParser<'f> {
    pub fn start(fmt: &'f str) -> PackResult<Self> {
        let fmt = if fmt.is_empty() { "u" } else { fmt };
        let fmt = fmt.as_bytes();

        let first_idx = match fmt[0] {
            b'@' | b'<' | b'>' => {
                return Err(invalid!(
                    "Byte order prefix {:?} is unsupported.",
                    char::from(fmt[0])
                ))
            }
            b'.' => 1,
            _ => 0,
        };
        if first_idx == fmt.len() {
            return Err(invalid!("Format has no directives."));
        }

        Ok(Self {
            fmt,
            first_idx,
            idx: first_idx,
            repeats: 0,
            curr: Directive {
                type_code: TypeCode::Pad,
                size: 0,
                has_size: false,
            },
        })
    }

    pub fn reset(&mut self) {
        self.idx = self.first_idx;
    }

    pub fn advance(&mut self) -> PackResult<ParseResult> {
        if self.repeats > 0 {
            self.repeats -= 1;
            return Ok(ParseResult::Some(self.curr));
        }

        loop {
            if self.idx == self.fmt.len() {
                return Ok(ParseResult::Exhausted);
            }

            /* size */
            let (size, has_size) = match self.scan_digits()? {
                None => (1, false),
                Some(size) => (size, true),
            };

            /* type letter */
            let letter = self.fmt[self.idx];
            let type_code = TypeCode::from_u8(letter).ok_or_else(|| {
                invalid!("Unknown type letter {:?} at {}.", char::from(letter), self.idx)
            })?;
            let is_last = self.idx == self.fmt.len() - 1;
            self.idx += 1;

            let mut dir = Directive {
                type_code,
                size,
                has_size,
            };
            match type_code {
                TypeCode::Pad | TypeCode::NulStr => {}
                TypeCode::FixedStr => {
                    if size < 1 {
                        return Err(invalid!("Fixed-length text needs a size of at least 1."));
                    }
                }
                TypeCode::Bitfield => {
                    if !(1..=8).contains(&size) {
                        return Err(invalid!("Bitfield size {} is outside 1..=8.", size));
                    }
                }
                TypeCode::Blob | TypeCode::PrefixedBlob => {
                    dir.type_code = if !has_size && !is_last {
                        TypeCode::PrefixedBlob
                    } else {
                        TypeCode::Blob
                    };
                }
                TypeCode::I8
                | TypeCode::U8
                | TypeCode::Short
                | TypeCode::UShort
                | TypeCode::Int
                | TypeCode::UInt
                | TypeCode::Long
                | TypeCode::ULong
                | TypeCode::Quad
                | TypeCode::UQuad
                | TypeCode::Record => {
                    if size == 0 {
                        continue;
                    }
                    dir.has_size = false;
                    self.repeats = size - 1;
                }
            }

            self.curr = dir;
            return Ok(ParseResult::Some(dir));
        }
    }

    fn scan_digits(&mut self) -> PackResult<Option<usize>> {
        let digits_len = self.fmt[self.idx..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits_len == 0 {
            return Ok(None);
        }

        let digits = &self.fmt[self.idx..self.idx + digits_len];
        self.idx += digits_len;
        if self.idx == self.fmt.len() {
            return Err(invalid!("Size at end of format has no type letter."));
        }

        let size = digits.iter().try_fold(0usize, |size, d| {
            size.checked_mul(10)?.checked_add(usize::from(d - b'0'))
        });
        size.map(Some)
            .ok_or_else(|| invalid!("Size {:?} overflows.", String::from_utf8_lossy(digits)))
    }
}
