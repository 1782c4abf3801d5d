//! Whole-stream integration tests, exercising the public API the way a
//! caller (mini-png, in this workspace) actually would, rather than the
//! block-level internals the unit tests cover.

use mini_inflate::{DeflateDecoder, DeflateOptions};

fn zlib_stored(raw: &[u8]) -> Vec<u8>
{
    let mut deflate = vec![0b0000_0001];
    deflate.extend_from_slice(&(raw.len() as u16).to_le_bytes());
    deflate.extend_from_slice(&(!(raw.len() as u16)).to_le_bytes());
    deflate.extend_from_slice(raw);

    let mut out = vec![0x78, 0x01];
    out.extend_from_slice(&deflate);
    out.extend_from_slice(&adler32(raw).to_be_bytes());
    out
}

fn adler32(data: &[u8]) -> u32
{
    let mut a = 1_u32;
    let mut b = 0_u32;

    for &byte in data
    {
        a = (a + u32::from(byte)) % 65521;
        b = (b + a) % 65521;
    }

    (b << 16) | a
}

#[test]
fn roundtrips_a_multi_block_stored_stream()
{
    let raw = b"the quick brown fox jumps over the lazy dog".repeat(4);
    let data = zlib_stored(&raw);

    let decoder = DeflateDecoder::new(&data);
    assert_eq!(decoder.decode_zlib().unwrap(), raw);
}

#[test]
fn rejects_truncated_zlib_header()
{
    let decoder = DeflateDecoder::new(&[0x78]);
    assert!(decoder.decode_zlib().is_err());
}

#[test]
fn rejects_flipped_adler32_trailer()
{
    let raw = b"hello, deflate";
    let mut data = zlib_stored(raw);
    let last = data.len() - 1;
    data[last] ^= 0xFF;

    let decoder = DeflateDecoder::new(&data);
    assert!(decoder.decode_zlib().is_err());
}

#[test]
fn flipped_trailer_is_accepted_with_checksum_disabled()
{
    let raw = b"hello, deflate";
    let mut data = zlib_stored(raw);
    let last = data.len() - 1;
    data[last] ^= 0xFF;

    let options = DeflateOptions::default().set_confirm_checksum(false);
    let decoder = DeflateDecoder::new_with_options(&data, options);
    assert_eq!(decoder.decode_zlib().unwrap(), raw);
}

/// A real zlib stream (produced by Python's `zlib` module at compression
/// level 1, which is what drove it to emit a single dynamic-Huffman block
/// instead of the fixed tables) wrapping a repeated paragraph long enough to
/// make a custom literal/length table pay off.
const DYNAMIC_HUFFMAN_ZLIB: [u8; 279] = [
    0x78, 0x01, 0xED, 0x91, 0xDB, 0x6D, 0xC3, 0x30, 0x0C, 0x45, 0x57, 0xE1, 0x00, 0x4D, 0x16, 0xE8,
    0x6F, 0x0A, 0x74, 0x80, 0x2E, 0x40, 0x4B, 0x94, 0x45, 0x84, 0x92, 0x0C, 0x91, 0x72, 0xE3, 0xED,
    0x4B, 0x39, 0xED, 0x4F, 0x37, 0x28, 0xD0, 0x4F, 0x3D, 0x70, 0xCF, 0xB9, 0xE4, 0xED, 0xA8, 0x58,
    0x38, 0xC0, 0xFB, 0x48, 0xA9, 0x60, 0x85, 0xD0, 0x22, 0xD7, 0x15, 0x96, 0xC1, 0x12, 0x15, 0x10,
    0xC2, 0x50, 0x6B, 0x05, 0x94, 0x0C, 0x5A, 0x9A, 0xAF, 0x04, 0x42, 0x75, 0xB5, 0xAC, 0x90, 0x5A,
    0x07, 0xCB, 0x7E, 0x66, 0xA3, 0x8E, 0x02, 0x58, 0x23, 0x44, 0x56, 0xC3, 0x1A, 0x08, 0x50, 0xB6,
    0x8C, 0x0B, 0x99, 0x82, 0x21, 0x4B, 0xEB, 0x14, 0xC1, 0x9A, 0xE7, 0xE9, 0x46, 0x81, 0x93, 0x03,
    0x17, 0x69, 0xE1, 0x3E, 0x33, 0x23, 0x1A, 0xBE, 0x80, 0x1D, 0x1B, 0x07, 0x14, 0x39, 0x00, 0x43,
    0x66, 0xDA, 0x4F, 0x09, 0x32, 0x4F, 0x76, 0x68, 0xD9, 0x3A, 0xA9, 0x72, 0xAB, 0xCE, 0x73, 0xC7,
    0x09, 0x4D, 0xFC, 0x98, 0x91, 0xB8, 0x08, 0x29, 0x7C, 0x66, 0x7A, 0xDE, 0xCE, 0x2C, 0x70, 0x03,
    0x73, 0x0D, 0x0E, 0xEA, 0x3A, 0x3B, 0xF5, 0x95, 0x40, 0x79, 0xAD, 0x93, 0x8A, 0xD5, 0x9C, 0x90,
    0xBA, 0x37, 0x9A, 0x21, 0x2B, 0x55, 0xEA, 0xEE, 0xF2, 0x56, 0x57, 0x61, 0xCD, 0x17, 0xA3, 0x87,
    0x5D, 0x84, 0xEF, 0x74, 0xF6, 0xE8, 0xBC, 0x0C, 0x7B, 0x42, 0x7F, 0xF3, 0xA8, 0xFB, 0x17, 0x9A,
    0xA9, 0x2E, 0x81, 0xBD, 0x8D, 0x1A, 0xAF, 0xF0, 0xE1, 0x89, 0x3F, 0xF5, 0xDC, 0xC0, 0x6D, 0x85,
    0x70, 0x77, 0xBD, 0x89, 0x0A, 0xB9, 0xB1, 0x8F, 0xC5, 0xFB, 0x9E, 0xCE, 0x30, 0xB6, 0x39, 0x8F,
    0xF3, 0xE5, 0xBB, 0x5E, 0xEB, 0xAF, 0x9E, 0x39, 0x27, 0xDC, 0x15, 0x8A, 0x8F, 0x1D, 0xBC, 0x6B,
    0x14, 0x82, 0xA5, 0x59, 0x86, 0xE1, 0xFE, 0xAD, 0x17, 0x39, 0xAE, 0xB7, 0xFF, 0x8D, 0xFD, 0xB1,
    0x8D, 0x7D, 0x01, 0xA8, 0x4F, 0x41, 0xFC
];

const DYNAMIC_HUFFMAN_TEXT: &str = concat!(
    "Dynamic Huffman coding builds a custom set of code lengths for the literal and distance ",
    "alphabets tailored to a specific block of data, typically achieving better compression ",
    "than the fixed tables when the data statistics diverge significantly from the generic ",
    "English-text-like distribution the fixed tables were designed around. The specification ",
    "leaves the choice of table up to the compressor; decoders must handle both uniformly."
);

#[test]
fn decodes_a_real_dynamic_huffman_block()
{
    let decoder = DeflateDecoder::new(&DYNAMIC_HUFFMAN_ZLIB);
    let out = decoder.decode_zlib().unwrap();

    let expected = DYNAMIC_HUFFMAN_TEXT.repeat(2);
    assert_eq!(out, expected.into_bytes());
}

#[test]
fn flipping_a_bit_of_a_dynamic_huffman_block_is_rejected()
{
    for bit in 0..8
    {
        let mut data = DYNAMIC_HUFFMAN_ZLIB;
        // Flip one bit deep inside the compressed payload (past the 2-byte
        // zlib header), leaving the trailer alone.
        data[40] ^= 1 << bit;

        let decoder = DeflateDecoder::new(&data);
        assert!(decoder.decode_zlib().is_err());
    }
}
