//! LSB-first bit reader over an in-memory byte source
//!
//! DEFLATE packs Huffman codewords MSB-first *within* a code, but emits the
//! bits of a code starting from the least-significant bit of each byte.
//! [`BitReader`] exposes both a single-bit read (used by [`crate::codetree`]
//! to walk a Huffman tree bit by bit) and a packed little-endian multi-bit
//! read (used for block headers, length/distance extra bits, and stored
//! block lengths).

use crate::errors::InflateError;

/// A bit-oriented reader over a byte slice.
///
/// Holds at most one byte of lookahead: a holding register and a count of
/// unread bits remaining in it (0..=8). This intentionally does not buffer
/// more than a byte at a time, mirroring the simplest possible correct
/// implementation rather than a wide-register, refill-amortized one.
pub struct BitReader<'a>
{
    source:         &'a [u8],
    position:       usize,
    current_byte:   u8,
    bits_remaining: u8
}

impl<'a> BitReader<'a>
{
    /// Wrap a byte slice for bit-oriented reading, starting at its first byte.
    pub const fn new(source: &'a [u8]) -> BitReader<'a>
    {
        BitReader {
            source,
            position: 0,
            current_byte: 0,
            bits_remaining: 0
        }
    }

    /// Number of whole bytes consumed so far, not counting a partially-read
    /// holding register.
    pub const fn bytes_consumed(&self) -> usize
    {
        self.position
    }

    /// Number of bytes not yet pulled into the holding register.
    pub const fn bytes_remaining(&self) -> usize
    {
        self.source.len() - self.position
    }

    /// `(8 - bits_remaining) mod 8`: how far into the current byte the next
    /// bit read will land.
    pub const fn bit_position(&self) -> u8
    {
        (8 - self.bits_remaining) % 8
    }

    /// Read a single bit, pulling a fresh byte from the source if the
    /// holding register is empty.
    ///
    /// Bits are emitted from a byte least-significant-bit first: the first
    /// call after a refill returns bit 0 of the byte, the next bit 1, and
    /// so on.
    pub fn read_bit(&mut self) -> Result<u32, InflateError>
    {
        if self.bits_remaining == 0
        {
            let byte = *self
                .source
                .get(self.position)
                .ok_or(InflateError::UnexpectedEof)?;

            self.position += 1;
            self.current_byte = byte;
            self.bits_remaining = 8;
        }

        let bit = (self.current_byte >> (7 - self.bits_remaining + 1)) & 1;
        self.bits_remaining -= 1;

        Ok(u32::from(bit))
    }

    /// Read `n` bits (`0..=32`) and assemble them little-endian: the first
    /// bit read becomes bit 0 of the result, the second bit 1, and so on.
    pub fn read_bits(&mut self, n: u32) -> Result<u32, InflateError>
    {
        debug_assert!(n <= 32);

        let mut result = 0_u32;

        for i in 0..n
        {
            result |= self.read_bit()? << i;
        }

        Ok(result)
    }

    /// Discard any residual bits in the holding register (re-aligning to a
    /// byte boundary) and read one whole byte.
    pub fn read_byte(&mut self) -> Result<u8, InflateError>
    {
        self.bits_remaining = 0;

        let byte = *self
            .source
            .get(self.position)
            .ok_or(InflateError::UnexpectedEof)?;

        self.position += 1;

        Ok(byte)
    }

    /// Read `n` raw, byte-aligned bytes. The caller is expected to have
    /// already discarded residual bits via [`read_byte`](Self::read_byte) or
    /// equivalent; this does not itself re-align.
    pub fn read_raw_bytes(&mut self, n: usize) -> Result<&'a [u8], InflateError>
    {
        let end = self.position.checked_add(n).ok_or(InflateError::UnexpectedEof)?;
        let bytes = self.source.get(self.position..end).ok_or(InflateError::UnexpectedEof)?;

        self.position = end;

        Ok(bytes)
    }

    /// Release the underlying source. `BitReader` borrows rather than owns
    /// its source, so this only drops the borrow; it exists to mirror the
    /// explicit lifecycle the rest of the pipeline uses.
    pub fn close(self) {}
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn lsb_order()
    {
        let mut reader = BitReader::new(&[0x63, 0xF8]);

        let first: Vec<u32> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(first, vec![1, 1, 0, 0, 0, 1, 1, 0]);

        let second: Vec<u32> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(second, vec![0, 0, 0, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn mixed_reads_and_byte_align()
    {
        let data = [0xB7, 0xC5, 0xBD, 0xDA, 0x5B, 0xD0, 0x3A, 0xD5, 0x19, 0x3A, 0x41, 0xA6];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.bit_position(), 0);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.bit_position(), 1);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.bit_position(), 2);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.bit_position(), 3);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.bit_position(), 4);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.bit_position(), 5);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.bit_position(), 6);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.bit_position(), 7);
        assert_eq!(reader.read_bit().unwrap(), 1);

        assert_eq!(reader.bit_position(), 0);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.bit_position(), 1);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.bit_position(), 2);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.bit_position(), 5);

        assert_eq!(reader.read_byte().unwrap(), 0xBD);

        assert_eq!(reader.bit_position(), 0);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.bit_position(), 6);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.bit_position(), 7);
        assert_eq!(reader.read_bit().unwrap(), 1);

        assert_eq!(reader.read_byte().unwrap(), 0x5B);

        assert_eq!(reader.bit_position(), 0);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.bit_position(), 1);

        assert_eq!(reader.read_byte().unwrap(), 0x3A);

        assert_eq!(reader.bit_position(), 0);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.bit_position(), 2);

        assert_eq!(reader.read_byte().unwrap(), 0x19);

        assert_eq!(reader.bit_position(), 0);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.read_bit().unwrap(), 1);
        assert_eq!(reader.read_bit().unwrap(), 0);
        assert_eq!(reader.bit_position(), 7);

        assert_eq!(reader.read_byte().unwrap(), 0x41);
        assert_eq!(reader.read_byte().unwrap(), 0xA6);
        assert_eq!(reader.bit_position(), 0);
    }

    #[test]
    fn read_bits_assembles_lsb_first()
    {
        // 0b0110_0011 read 3 bits at a time: bit0=1,bit1=1,bit2=0 -> value 0b011 = 3
        let mut reader = BitReader::new(&[0x63]);
        let v = reader.read_bits(3).unwrap();
        assert_eq!(v, 0b011);
    }

    #[test]
    fn eof_on_empty_source()
    {
        let mut reader = BitReader::new(&[]);
        assert!(matches!(reader.read_bit(), Err(InflateError::UnexpectedEof)));
    }
}
