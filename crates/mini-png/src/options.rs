//! Decoder options for the PNG layer
//!
//! Crate-wide limits (`max_width`, `max_height`, `strict_mode`) live in
//! [`mini_core::options::DecoderOptions`] and are threaded through from
//! there; PNG-specific knobs (checksum verification toggles, the
//! unknown-chunk handler) live here, following the `DecoderOptions`/
//! `PngOptions` split used by the sibling project this crate is descended
//! from.

use mini_core::options::DecoderOptions;

use crate::error::PngError;

/// Called for every chunk this crate does not itself interpret.
///
/// `ancillary` is derived from bit 5 of the chunk type's first byte: an
/// unknown ancillary chunk is safe to skip, an unknown critical chunk is
/// fatal.
pub type UnknownChunkHandler = fn(chunk_type: [u8; 4], ancillary: bool) -> Result<(), PngError>;

/// Skip unknown ancillary chunks with a trace log; reject unknown critical
/// ones.
pub fn default_unknown_chunk_handler(chunk_type: [u8; 4], ancillary: bool) -> Result<(), PngError>
{
    let name = std::str::from_utf8(&chunk_type).unwrap_or("????");

    if ancillary
    {
        log::trace!("skipping unknown ancillary chunk {name}");
        Ok(())
    }
    else
    {
        log::error!("unknown critical chunk {name}, cannot proceed");
        Err(PngError::UnsupportedFile(format!(
            "unknown critical chunk {name}"
        )))
    }
}

/// Options respected by [`crate::PngDecoder`].
#[derive(Copy, Clone)]
pub struct PngOptions
{
    /// Crate-wide limits shared with every other decoder in the workspace.
    pub core: DecoderOptions,

    /// Verify each chunk's CRC-32 against its `type || data`.
    ///
    /// - Default value: true
    pub confirm_crc: bool,

    /// Verify the trailing Adler-32 after inflating `IDAT`/`zTXt`/`iTXt`
    /// payloads.
    ///
    /// - Default value: true
    pub confirm_adler32: bool,

    /// Invoked for chunks this crate does not itself know how to parse.
    pub unknown_chunk_handler: UnknownChunkHandler
}

impl Default for PngOptions
{
    fn default() -> Self
    {
        Self {
            core:                  DecoderOptions::default(),
            confirm_crc:           true,
            confirm_adler32:       true,
            unknown_chunk_handler: default_unknown_chunk_handler
        }
    }
}

impl PngOptions
{
    pub const fn set_core(mut self, core: DecoderOptions) -> Self
    {
        self.core = core;
        self
    }

    pub const fn set_confirm_crc(mut self, confirm_crc: bool) -> Self
    {
        self.confirm_crc = confirm_crc;
        self
    }

    pub const fn set_confirm_adler32(mut self, confirm_adler32: bool) -> Self
    {
        self.confirm_adler32 = confirm_adler32;
        self
    }

    pub const fn set_unknown_chunk_handler(mut self, handler: UnknownChunkHandler) -> Self
    {
        self.unknown_chunk_handler = handler;
        self
    }
}
