//! DEFLATE (RFC 1951) block loop
//!
//! Drives a [`BitReader`] and a [`SlidingWindow`] through the three block
//! types DEFLATE defines, emitting inflated bytes into a growable output
//! buffer.

use crate::bitstream::BitReader;
use crate::codetree::CodeTree;
use crate::errors::InflateError;
use crate::window::SlidingWindow;

/// Fixed permutation in which the 19 code-length code lengths are
/// transmitted for a dynamic block (RFC 1951 section 3.2.7).
const CODE_LENGTH_ORDER: [usize; 19] =
    [16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15];

/// A one-shot DEFLATE decompressor.
///
/// Owns the bit reader and sliding window for a single compressed stream;
/// a `Deflate` instance is single-use, matching the upstream compressed
/// stream it was built over.
pub struct Deflate<'a>
{
    reader: BitReader<'a>,
    window: SlidingWindow
}

impl<'a> Deflate<'a>
{
    pub fn new(source: &'a [u8]) -> Deflate<'a>
    {
        Deflate {
            reader: BitReader::new(source),
            window: SlidingWindow::new()
        }
    }

    /// Run the full block loop until `BFINAL` is seen, returning the
    /// inflated bytes.
    pub fn decompress(mut self) -> Result<Vec<u8>, InflateError>
    {
        let mut output = Vec::new();

        loop
        {
            let is_final = self.reader.read_bits(1)? == 1;
            let block_type = self.reader.read_bits(2)?;

            match block_type
            {
                0 => self.decode_stored_block(&mut output)?,
                1 => self.decode_huffman_block(&fixed_literal_tree()?, fixed_distance_tree()?.as_ref(), &mut output)?,
                2 => self.decode_dynamic_block(&mut output)?,
                _ => return Err(InflateError::CorruptStream("reserved BTYPE 11"))
            }

            if is_final
            {
                break;
            }
        }

        Ok(output)
    }

    fn decode_stored_block(&mut self, output: &mut Vec<u8>) -> Result<(), InflateError>
    {
        // Align to the next byte boundary, discarding residual bits.
        let len_lo = self.reader.read_byte()?;
        let len_hi = self.reader.read_byte()?;
        let nlen_lo = self.reader.read_byte()?;
        let nlen_hi = self.reader.read_byte()?;

        let len = u16::from_le_bytes([len_lo, len_hi]);
        let nlen = u16::from_le_bytes([nlen_lo, nlen_hi]);

        if len ^ 0xFFFF != nlen
        {
            return Err(InflateError::CorruptStream("stored block LEN/NLEN mismatch"));
        }

        let bytes = self.reader.read_raw_bytes(usize::from(len))?;

        output.extend_from_slice(bytes);
        for &byte in bytes
        {
            self.window.append(byte);
        }

        Ok(())
    }

    fn decode_dynamic_block(&mut self, output: &mut Vec<u8>) -> Result<(), InflateError>
    {
        let hlit = self.reader.read_bits(5)? as usize + 257;
        let hdist = self.reader.read_bits(5)? as usize + 1;
        let hclen = self.reader.read_bits(4)? as usize + 4;

        let mut code_length_lengths = [0_u32; 19];
        for &position in CODE_LENGTH_ORDER.iter().take(hclen)
        {
            code_length_lengths[position] = self.reader.read_bits(3)?;
        }

        let code_length_tree = CodeTree::new(&code_length_lengths)?;

        let mut lengths = Vec::with_capacity(hlit + hdist);
        let mut previous_value: Option<u32> = None;

        while lengths.len() < hlit + hdist
        {
            let symbol = code_length_tree.decode_symbol(&mut self.reader)?;

            match symbol
            {
                0..=15 =>
                {
                    lengths.push(symbol);
                    previous_value = Some(symbol);
                }
                16 =>
                {
                    let repeat = self.reader.read_bits(2)? + 3;
                    let value = previous_value.ok_or(InflateError::CorruptStream(
                        "repeat code 16 with no previous code length"
                    ))?;

                    for _ in 0..repeat
                    {
                        lengths.push(value);
                    }
                }
                17 =>
                {
                    let repeat = self.reader.read_bits(3)? + 3;
                    for _ in 0..repeat
                    {
                        lengths.push(0);
                    }
                    previous_value = Some(0);
                }
                18 =>
                {
                    let repeat = self.reader.read_bits(7)? + 11;
                    for _ in 0..repeat
                    {
                        lengths.push(0);
                    }
                    previous_value = Some(0);
                }
                _ => return Err(InflateError::CorruptStream("invalid code-length symbol"))
            }
        }

        if lengths.len() != hlit + hdist
        {
            return Err(InflateError::CorruptStream(
                "code length run-lengths overshot HLIT+HDIST"
            ));
        }

        let literal_lengths = &lengths[..hlit];
        let distance_lengths = &lengths[hlit..];

        let literal_tree = CodeTree::new(literal_lengths)?;
        let distance_tree = build_distance_tree(distance_lengths)?;

        self.decode_huffman_block(&literal_tree, distance_tree.as_ref(), output)
    }

    /// Shared symbol-decoding loop used by both fixed and dynamic blocks.
    fn decode_huffman_block(
        &mut self, literal_tree: &CodeTree, distance_tree: Option<&CodeTree>,
        output: &mut Vec<u8>
    ) -> Result<(), InflateError>
    {
        loop
        {
            let symbol = literal_tree.decode_symbol(&mut self.reader)?;

            match symbol
            {
                0..=255 =>
                {
                    output.push(symbol as u8);
                    self.window.append(symbol as u8);
                }
                256 => return Ok(()),
                257..=285 =>
                {
                    let length = self.decode_length(symbol)?;

                    let distance_tree = distance_tree.ok_or(InflateError::CorruptStream(
                        "length symbol decoded but no distance table is present"
                    ))?;

                    let distance_symbol = distance_tree.decode_symbol(&mut self.reader)?;
                    let distance = self.decode_distance(distance_symbol)?;

                    self.window.copy(length, distance, output)?;
                }
                _ => return Err(InflateError::CorruptStream("invalid literal/length symbol"))
            }
        }
    }

    /// RFC 1951 section 3.2.5, implemented by formula rather than table.
    fn decode_length(&mut self, symbol: u32) -> Result<u32, InflateError>
    {
        let length = match symbol
        {
            285 => 258,
            257..=264 => symbol - 254,
            265..=284 =>
            {
                let extra = (symbol - 261) / 4;
                let base = (((symbol - 265) % 4 + 4) << extra) + 3;
                base + self.reader.read_bits(extra)?
            }
            _ => return Err(InflateError::CorruptStream("invalid length symbol"))
        };

        if !(3..=258).contains(&length)
        {
            return Err(InflateError::CorruptStream("decoded length out of range"));
        }

        Ok(length)
    }

    fn decode_distance(&mut self, symbol: u32) -> Result<u32, InflateError>
    {
        let distance = match symbol
        {
            0..=3 => symbol + 1,
            4..=29 =>
            {
                let extra = symbol / 2 - 1;
                let base = ((symbol % 2 + 2) << extra) + 1;
                base + self.reader.read_bits(extra)?
            }
            _ => return Err(InflateError::CorruptStream("reserved distance symbol"))
        };

        if !(1..=32768).contains(&distance)
        {
            return Err(InflateError::CorruptStream("decoded distance out of range"));
        }

        Ok(distance)
    }
}

/// Build the literal/length tree for fixed Huffman blocks (RFC 1951
/// section 3.2.6): 288 symbols with lengths 8/9/7/8 across four ranges.
fn fixed_literal_tree() -> Result<CodeTree, InflateError>
{
    let mut lengths = [0_u32; 288];
    lengths[0..144].fill(8);
    lengths[144..256].fill(9);
    lengths[256..280].fill(7);
    lengths[280..288].fill(8);

    CodeTree::new(&lengths)
}

/// Build the distance tree for fixed Huffman blocks: 32 symbols, all of
/// length 5.
fn fixed_distance_tree() -> Result<Option<CodeTree>, InflateError>
{
    let lengths = [5_u32; 32];
    Ok(Some(CodeTree::new(&lengths)?))
}

/// Build the distance tree for a dynamic block, applying the single-symbol
/// padding exception: a distance table with exactly one length-1 symbol and
/// no others assigned is legal (it means back-references never need more
/// than that single code), but is not by itself a complete binary tree. We
/// pad it to the full 32-entry table with a second dummy code so the
/// general-purpose tree builder accepts it.
fn build_distance_tree(lengths: &[u32]) -> Result<Option<CodeTree>, InflateError>
{
    if lengths.iter().all(|&l| l == 0)
    {
        return Ok(None);
    }

    let nonzero: Vec<usize> = lengths
        .iter()
        .enumerate()
        .filter(|&(_, &l)| l != 0)
        .map(|(i, _)| i)
        .collect();

    if nonzero.len() == 1 && lengths[nonzero[0]] == 1
    {
        let mut padded = vec![0_u32; lengths.len().max(32)];
        padded[..lengths.len()].copy_from_slice(lengths);

        let dummy_index = if nonzero[0] == 0 { 1 } else { 0 };
        padded[dummy_index] = 1;

        return Ok(Some(CodeTree::new(&padded)?));
    }

    Ok(Some(CodeTree::new(lengths)?))
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn stored_block_hello()
    {
        // BFINAL=1, BTYPE=00 packed into the first byte's low 3 bits,
        // then byte-aligned LEN=0x0005, NLEN=0xFFFA, then "Hello".
        let mut data = vec![0b0000_0001];
        data.extend_from_slice(&0x0005_u16.to_le_bytes());
        data.extend_from_slice(&0xFFFA_u16.to_le_bytes());
        data.extend_from_slice(b"Hello");

        let out = Deflate::new(&data).decompress().unwrap();
        assert_eq!(out, b"Hello");
    }

    #[test]
    fn fixed_huffman_deflate_late()
    {
        // Raw deflate payload (no zlib framing) for the classic "Deflate late" vector.
        let data = [0x73, 0x49, 0x4D, 0xCB, 0x49, 0x2C, 0x49, 0x55, 0x00, 0x11, 0x00];

        let out = Deflate::new(&data).decompress().unwrap();
        assert_eq!(out, b"Deflate late");
    }

    #[test]
    fn rejects_reserved_block_type()
    {
        // BFINAL=1, BTYPE=11.
        let data = [0b0000_0111];
        assert!(Deflate::new(&data).decompress().is_err());
    }

    #[test]
    fn stored_block_rejects_len_nlen_mismatch()
    {
        let mut data = vec![0b0000_0001];
        data.extend_from_slice(&0x0005_u16.to_le_bytes());
        data.extend_from_slice(&0x0005_u16.to_le_bytes()); // should be !LEN
        data.extend_from_slice(b"Hello");

        assert!(Deflate::new(&data).decompress().is_err());
    }
}
