//! A from-scratch DEFLATE decompressor.
//!
//! This crate decodes RFC 1951 DEFLATE streams (and, with the `zlib`
//! feature, RFC 1950 zlib-framed ones) using an explicit canonical Huffman
//! tree rather than a lookup-table decoder. It favors being easy to follow
//! over being fast: every block type, every length/distance formula, and
//! the single-symbol distance-table exception are implemented directly
//! against the RFC rather than against a speed-optimized table layout.
//!
//! # Usage
//!
//! Decoding a raw deflate stream:
//! ```no_run
//! use mini_inflate::DeflateDecoder;
//! let totally_valid_data = [0; 23];
//! let decoder = DeflateDecoder::new(&totally_valid_data);
//!
//! let decompressed = decoder.decode_deflate();
//! ```
//!
//! Decoding a zlib-framed stream:
//! ```no_run
//! use mini_inflate::DeflateDecoder;
//! let totally_valid_data = [0; 23];
//! let decoder = DeflateDecoder::new(&totally_valid_data);
//!
//! let decompressed = decoder.decode_zlib();
//! ```
//!
//! Decoding a zlib-framed stream without confirming the Adler-32 trailer:
//! ```no_run
//! use mini_inflate::{DeflateDecoder, DeflateOptions};
//! let totally_valid_data = [0; 23];
//! let options = DeflateOptions::default().set_confirm_checksum(false);
//! let decoder = DeflateDecoder::new_with_options(&totally_valid_data, options);
//!
//! let decompressed = decoder.decode_zlib();
//! ```
mod bitstream;
mod codetree;
mod deflate;
pub mod errors;
mod window;
#[cfg(feature = "zlib")]
mod zlib;

use crate::deflate::Deflate;
use crate::errors::InflateError;

/// Options controlling a single decode call.
#[derive(Copy, Clone, Debug)]
pub struct DeflateOptions
{
    /// Whether [`DeflateDecoder::decode_zlib`] verifies the trailing
    /// Adler-32 checksum.
    ///
    /// - Default value: true
    pub confirm_checksum: bool
}

impl Default for DeflateOptions
{
    fn default() -> Self
    {
        DeflateOptions {
            confirm_checksum: true
        }
    }
}

impl DeflateOptions
{
    pub const fn set_confirm_checksum(mut self, confirm_checksum: bool) -> Self
    {
        self.confirm_checksum = confirm_checksum;
        self
    }
}

/// A one-shot decoder over a byte slice, producing either a raw DEFLATE
/// decode or a zlib-framed one.
pub struct DeflateDecoder<'a>
{
    data:    &'a [u8],
    options: DeflateOptions
}

impl<'a> DeflateDecoder<'a>
{
    pub const fn new(data: &'a [u8]) -> DeflateDecoder<'a>
    {
        Self::new_with_options(data, DeflateOptions { confirm_checksum: true })
    }

    pub const fn new_with_options(data: &'a [u8], options: DeflateOptions) -> DeflateDecoder<'a>
    {
        DeflateDecoder { data, options }
    }

    /// Decode `data` as a raw DEFLATE stream (no zlib framing).
    pub fn decode_deflate(&self) -> Result<Vec<u8>, InflateError>
    {
        Deflate::new(self.data).decompress()
    }

    /// Decode `data` as a zlib-framed DEFLATE stream, stripping the 2-byte
    /// header and, unless disabled via [`DeflateOptions`], verifying the
    /// trailing Adler-32.
    #[cfg(feature = "zlib")]
    pub fn decode_zlib(&self) -> Result<Vec<u8>, InflateError>
    {
        zlib::inflate_zlib(self.data, self.options.confirm_checksum)
    }
}
