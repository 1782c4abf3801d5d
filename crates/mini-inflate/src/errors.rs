use std::fmt::{Debug, Formatter};

/// Errors produced while inflating a DEFLATE or zlib stream.
pub enum InflateError
{
    /// The input was exhausted while more bits or bytes were still needed.
    UnexpectedEof,
    /// The compressed stream itself is malformed: a reserved block type, a
    /// stored-block length mismatch, an invalid Huffman code, or a
    /// back-reference pointing outside the bytes produced so far.
    CorruptStream(&'static str),
    /// The zlib header declared a compression method, window size, or
    /// `FCHECK` value this decoder does not support.
    UnsupportedZlibHeader(&'static str),
    /// The trailing Adler-32 checksum did not match the inflated bytes.
    ///
    /// Carries `(expected, computed)`.
    ChecksumMismatch(u32, u32)
}

impl Debug for InflateError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::UnexpectedEof => writeln!(f, "unexpected end of input"),
            Self::CorruptStream(msg) => writeln!(f, "corrupt deflate stream: {msg}"),
            Self::UnsupportedZlibHeader(msg) => writeln!(f, "unsupported zlib header: {msg}"),
            Self::ChecksumMismatch(expected, computed) => writeln!(
                f,
                "adler-32 mismatch: expected {expected:#010x}, computed {computed:#010x}"
            )
        }
    }
}
