//! A from-scratch PNG container parser built on [`mini_inflate`]'s DEFLATE
//! decompressor.
//!
//! This crate validates the PNG signature, iterates CRC-checked chunks,
//! interprets `IHDR`/`PLTE`/`tRNS`/`bKGD`/`gAMA`/`tIME`/text chunks, and
//! inflates the concatenated `IDAT` payload. It stops there: row
//! unfiltering, interlace deinterleaving, and palette expansion to RGBA
//! pixel grids are a renderer's job, operating on [`Picture::raw_scanlines`]
//! and the rest of the returned metadata.
//!
//! # Usage
//!
//! ```no_run
//! use mini_png::Reader;
//!
//! let reader = Reader::open("image.png").unwrap();
//! let picture = reader.picture().unwrap();
//!
//! println!("{}x{}", picture.width, picture.height);
//! ```
//!
//! Decoding from bytes already in memory:
//!
//! ```no_run
//! use mini_png::PngDecoder;
//!
//! let file_bytes = std::fs::read("image.png").unwrap();
//! let picture = PngDecoder::new(&file_bytes).decode().unwrap();
//! ```
mod chunk;
mod decoder;
pub mod error;
mod headers;
pub mod metadata;
pub mod options;

use std::io;
use std::path::Path;

pub use decoder::PngDecoder;
pub use error::PngError;
pub use metadata::Picture;
pub use options::PngOptions;

fn classify_io_error(err: io::Error) -> PngError
{
    if err.kind() == io::ErrorKind::NotFound
    {
        PngError::NotFound(err)
    }
    else
    {
        PngError::NotAFile(err)
    }
}

/// A file-backed PNG reader: the consumer-facing entry point for a
/// renderer.
///
/// `open` reads the whole file into memory and hands it to [`PngDecoder`];
/// a caller that already holds the file's bytes (an embedding renderer,
/// most tests) should use [`PngDecoder::new`] directly instead.
pub struct Reader
{
    data:    Vec<u8>,
    options: PngOptions
}

impl Reader
{
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Reader, PngError>
    {
        Reader::open_with_options(path, PngOptions::default())
    }

    pub fn open_with_options<P: AsRef<Path>>(path: P, options: PngOptions) -> Result<Reader, PngError>
    {
        let data = std::fs::read(path).map_err(classify_io_error)?;

        Ok(Reader { data, options })
    }

    /// Parse the file and return its metadata and inflated scanline bytes.
    pub fn picture(&self) -> Result<Picture, PngError>
    {
        PngDecoder::new_with_options(&self.data, self.options).decode()
    }
}
