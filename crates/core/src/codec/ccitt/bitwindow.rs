//! Bit-addressed window over an encoded CCITT buffer.
//!
//! Codes in T.4/T.6 data are not byte aligned, so every lookup starts from a
//! raw bit offset. A window is the next 32 bits at that offset, left
//! justified: bit 31 is the first unread bit.

use crate::error::CcittError;

/// Width of a window in bits.
pub const WINDOW_BITS: usize = 32;

/// Read-only view of an encoded buffer addressed by bit position.
#[derive(Debug, Clone, Copy)]
pub struct BitWindow<'a> {
    data: &'a [u8],
}

impl<'a> BitWindow<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        BitWindow { data }
    }

    /// Total number of bits in the underlying buffer.
    pub fn len_bits(&self) -> usize {
        self.data.len() * 8
    }

    /// The window starting at bit `pos`. See [`peek_bits`].
    pub fn peek(&self, pos: usize) -> Result<u32, CcittError> {
        peek_bits(self.data, pos)
    }

    /// True if nothing but zero padding is left from `pos` to the end of
    /// the buffer, and that padding is shorter than one byte.
    pub fn at_padding_end(&self, pos: usize) -> bool {
        let byte = pos / 8;
        if byte >= self.data.len() {
            return true;
        }
        if byte + 1 != self.data.len() {
            return false;
        }
        let rest = (self.data[byte] as u32) << (pos % 8);
        rest & 0xFF == 0
    }
}

/// Returns the 32 bits of `data` starting at bit `pos`, most significant
/// bit first.
///
/// Up to four bytes are read from `pos / 8`; bits already consumed in the
/// first byte are shifted out and bits past the end of the buffer read as
/// zero. Fails if `pos` does not address a bit inside `data`.
pub fn peek_bits(data: &[u8], pos: usize) -> Result<u32, CcittError> {
    let start = pos / 8;
    if start >= data.len() {
        return Err(CcittError::BitWindowOverflow {
            pos,
            len: data.len(),
        });
    }

    let mut window = 0u32;
    for i in 0..4 {
        window <<= 8;
        if let Some(&byte) = data.get(start + i) {
            window |= byte as u32;
        }
    }

    Ok(window << (pos % 8))
}

/// Tests whether `code`, a string of `'0'`/`'1'` characters, matches the
/// leading bits of `window`.
pub fn has_prefix(window: u32, code: &str) -> bool {
    if code.len() > WINDOW_BITS {
        return false;
    }

    code.bytes().enumerate().all(|(i, c)| {
        let bit = (window >> (WINDOW_BITS - 1 - i)) & 1;
        match c {
            b'0' => bit == 0,
            b'1' => bit == 1,
            _ => false,
        }
    })
}
