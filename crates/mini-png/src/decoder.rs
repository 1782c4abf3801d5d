//! The chunk loop: dispatches each chunk to [`crate::headers`], concatenates
//! `IDAT` payloads, and inflates the result into [`Picture::raw_scanlines`].

use crate::chunk::{KnownChunk, PngChunkStream};
use crate::error::PngError;
use crate::headers;
use crate::metadata::Picture;
use crate::options::PngOptions;

/// A one-shot decoder over an in-memory PNG file.
pub struct PngDecoder<'a>
{
    data:    &'a [u8],
    options: PngOptions
}

impl<'a> PngDecoder<'a>
{
    pub fn new(data: &'a [u8]) -> PngDecoder<'a>
    {
        PngDecoder::new_with_options(data, PngOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: PngOptions) -> PngDecoder<'a>
    {
        PngDecoder { data, options }
    }

    /// Parse every chunk, inflate the `IDAT` stream, and return the
    /// accumulated metadata.
    ///
    /// Errors decoding an ancillary chunk are logged and swallowed, leaving
    /// the corresponding field of [`Picture`] unset; errors decoding a
    /// critical chunk (`IHDR`, `PLTE`, `IDAT`, an unknown critical chunk)
    /// abort the whole load.
    pub fn decode(&self) -> Result<Picture, PngError>
    {
        let mut picture = Picture::default();
        let mut idat = Vec::with_capacity(self.data.len());
        let mut seen_ihdr = false;

        for (index, chunk) in PngChunkStream::new(self.data, self.options.confirm_crc)?.enumerate()
        {
            let chunk = chunk?;

            if index == 0 && chunk.kind != Some(KnownChunk::IHDR)
            {
                return Err(PngError::CorruptFile("first chunk is not IHDR".into()));
            }

            match chunk.kind
            {
                Some(KnownChunk::IHDR) =>
                {
                    if seen_ihdr
                    {
                        return Err(PngError::CorruptFile("multiple IHDR chunks".into()));
                    }
                    headers::parse_ihdr(&mut picture, &chunk, &self.options)?;
                    seen_ihdr = true;
                }
                Some(KnownChunk::PLTE) => headers::parse_plte(&mut picture, &chunk)?,
                Some(KnownChunk::IDAT) => idat.extend_from_slice(chunk.data),
                Some(KnownChunk::IEND) => break,
                Some(KnownChunk::tRNS) =>
                {
                    if let Err(err) = headers::parse_trns(&mut picture, &chunk)
                    {
                        log::warn!("skipping malformed tRNS chunk: {err:?}");
                    }
                }
                Some(KnownChunk::bKGD) =>
                {
                    if let Err(err) = headers::parse_bkgd(&mut picture, &chunk)
                    {
                        log::warn!("skipping malformed bKGD chunk: {err:?}");
                    }
                }
                Some(KnownChunk::gAMA) =>
                {
                    headers::parse_gama(&mut picture, &chunk, &self.options)?;
                }
                Some(KnownChunk::tIME) =>
                {
                    if let Err(err) = headers::parse_time(&mut picture, &chunk)
                    {
                        log::warn!("skipping malformed tIME chunk: {err:?}");
                    }
                }
                Some(KnownChunk::tEXt) =>
                {
                    if let Err(err) = headers::parse_text(&mut picture, &chunk)
                    {
                        log::warn!("skipping malformed tEXt chunk: {err:?}");
                    }
                }
                Some(KnownChunk::zTXt) =>
                {
                    if let Err(err) = headers::parse_ztxt(&mut picture, &chunk, &self.options)
                    {
                        log::warn!("skipping malformed zTXt chunk: {err:?}");
                    }
                }
                Some(KnownChunk::iTXt) =>
                {
                    if let Err(err) = headers::parse_itxt(&mut picture, &chunk, &self.options)
                    {
                        log::warn!("skipping malformed iTXt chunk: {err:?}");
                    }
                }
                None => (self.options.unknown_chunk_handler)(chunk.chunk_type, chunk.classification.ancillary)?
            }
        }

        if !seen_ihdr
        {
            return Err(PngError::CorruptFile("no IHDR chunk present".into()));
        }

        if picture.type_of_pixel == Some(mini_core::colorspace::PixelType::IndexedColor) && picture.palette.is_none()
        {
            return Err(PngError::EmptyPalette);
        }

        picture.raw_scanlines = self.inflate_idat(&idat)?;

        Ok(picture)
    }

    /// Undo the zlib framing and DEFLATE compression of the concatenated
    /// `IDAT` payload.
    fn inflate_idat(&self, idat: &[u8]) -> Result<Vec<u8>, PngError>
    {
        let decoder = mini_inflate::DeflateDecoder::new_with_options(
            idat,
            mini_inflate::DeflateOptions::default().set_confirm_checksum(self.options.confirm_adler32)
        );

        Ok(decoder.decode_zlib()?)
    }
}
