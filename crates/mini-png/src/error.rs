//! Error taxonomy for the PNG container parser
//!
//! Lower-layer errors are wrapped, not flattened: a caller can match on
//! [`PngError::Inflate`] to distinguish a DEFLATE/zlib failure from a
//! PNG-container-level one, mirroring the `ZlibDecodeErrors`/`PngErrors`
//! split used by the sibling project this crate is descended from.

use std::fmt::{Debug, Formatter};
use std::io;

use mini_inflate::errors::InflateError;

/// Errors produced while parsing a PNG file or decoding its pixel/text
/// streams. Every variant is fatal to the operation in progress; see the
/// crate documentation for which ones are swallowed per-chunk versus
/// propagated to the caller.
pub enum PngError
{
    /// The path could not be found on disk.
    NotFound(io::Error),
    /// The path exists but could not be opened as a regular file (a
    /// directory, a permission error, and so on).
    NotAFile(io::Error),
    /// The first 8 bytes did not match the PNG signature.
    NotPng,
    /// A chunk's CRC-32 did not match, or a chunk was truncated.
    CorruptFile(String),
    /// An unknown critical chunk was encountered, an `(color_type,
    /// bit_depth)` combination is invalid, or a text chunk declared an
    /// unsupported compression method.
    UnsupportedFile(String),
    /// A failure from the DEFLATE/zlib layer while inflating `IDAT`, `zTXt`,
    /// or a compressed `iTXt`.
    Inflate(InflateError),
    /// `IDAT` data decoded without error but a `tRNS`/`PLTE` pairing left an
    /// indexed-color image with no palette to index into.
    EmptyPalette
}

impl Debug for PngError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::NotFound(err) => write!(f, "png file not found: {err}"),
            Self::NotAFile(err) => write!(f, "could not open png file: {err}"),
            Self::NotPng => write!(f, "bad PNG signature, not a png"),
            Self::CorruptFile(msg) => write!(f, "corrupt png file: {msg}"),
            Self::UnsupportedFile(msg) => write!(f, "unsupported png file: {msg}"),
            Self::Inflate(err) => write!(f, "error inflating compressed stream: {err:?}"),
            Self::EmptyPalette => write!(f, "indexed-color image with an empty palette")
        }
    }
}

impl From<InflateError> for PngError
{
    fn from(err: InflateError) -> Self
    {
        Self::Inflate(err)
    }
}

impl From<String> for PngError
{
    fn from(val: String) -> Self
    {
        Self::CorruptFile(val)
    }
}

impl From<&'static str> for PngError
{
    fn from(val: &'static str) -> Self
    {
        Self::CorruptFile(val.to_string())
    }
}

impl From<std::string::FromUtf8Error> for PngError
{
    fn from(err: std::string::FromUtf8Error) -> Self
    {
        Self::CorruptFile(format!("invalid utf-8 in text chunk: {err}"))
    }
}
