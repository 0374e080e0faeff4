use crate::err::{invalid, PackResult};

/// A read position over a borrowed input span.
///
/// The end bound is the end of the span. Every read either advances within
/// bounds or fails with [`crate::PackErr::InvalidParam`]; nothing reads past the end.
pub struct ByteCursor<'b> {
    buf: &'b [u8],
    pos: usize,
}

impl<'b> ByteCursor<'b> {
    pub fn new(buf: &'b [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn take_byte(&mut self) -> PackResult<u8> {
        match self.buf.get(self.pos) {
            None => Err(invalid!("Read of 1 byte at offset {} exceeds end.", self.pos)),
            Some(b) => {
                self.pos += 1;
                Ok(*b)
            }
        }
    }

    pub fn take(&mut self, len: usize) -> PackResult<&'b [u8]> {
        let end = self.pos.checked_add(len).filter(|end| *end <= self.buf.len());
        match end {
            None => Err(invalid!(
                "Read of {} bytes at offset {} exceeds end {}.",
                len,
                self.pos,
                self.buf.len()
            )),
            Some(end) => {
                let bytes = &self.buf[self.pos..end];
                self.pos = end;
                Ok(bytes)
            }
        }
    }

    pub fn take_rest(&mut self) -> &'b [u8] {
        let bytes = &self.buf[self.pos..];
        self.pos = self.buf.len();
        bytes
    }

    /// Returns the bytes before the next NUL, and advances past that NUL.
    pub fn take_nul_terminated(&mut self) -> PackResult<&'b [u8]> {
        let rest = &self.buf[self.pos..];
        match rest.iter().position(|b| *b == 0) {
            None => Err(invalid!("No NUL terminator after offset {}.", self.pos)),
            Some(nul_pos) => {
                self.pos += nul_pos + 1;
                Ok(&rest[..nul_pos])
            }
        }
    }
}
