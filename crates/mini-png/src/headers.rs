//! Interpretation of each known chunk's `data`, split out of the chunk loop
//! in [`crate::decoder`] the way the sibling project splits `headers.rs`
//! from `decoder.rs`.

use mini_core::bit_depth::BitDepth;
use mini_core::bytestream::ZByteReader;
use mini_core::colorspace::PixelType;

use crate::chunk::Chunk;
use crate::error::PngError;
use crate::metadata::{BackgroundColor, Gamma, PaletteEntry, Picture, PngTime, TextEntry, TransparentColor};
use crate::options::PngOptions;

/// Decode Latin-1 bytes to a `String`: every Latin-1 code point is also the
/// Unicode code point of the same number, so this is a direct `char` cast,
/// not a lookup table.
fn latin1_to_string(bytes: &[u8]) -> String
{
    bytes.iter().map(|&b| b as char).collect()
}

fn split_at_nul(data: &[u8]) -> Result<(&[u8], &[u8]), PngError>
{
    let pos = data
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| PngError::CorruptFile("missing NUL separator in text chunk".into()))?;

    Ok((&data[..pos], &data[pos + 1..]))
}

pub(crate) fn parse_ihdr(picture: &mut Picture, chunk: &Chunk, options: &PngOptions) -> Result<(), PngError>
{
    if chunk.data.len() != 13
    {
        return Err(PngError::CorruptFile(format!(
            "IHDR length must be 13, got {}",
            chunk.data.len()
        )));
    }

    let mut reader = ZByteReader::new(chunk.data);

    let width = reader.get_u32_be();
    let height = reader.get_u32_be();

    if width == 0 || height == 0
    {
        return Err(PngError::CorruptFile("width or height cannot be zero".into()));
    }

    if width as usize > options.core.max_width
    {
        return Err(PngError::UnsupportedFile(format!(
            "image width {width} exceeds configured maximum {}",
            options.core.max_width
        )));
    }

    if height as usize > options.core.max_height
    {
        return Err(PngError::UnsupportedFile(format!(
            "image height {height} exceeds configured maximum {}",
            options.core.max_height
        )));
    }

    let bit_depth = reader.get_u8();
    let color_type = reader.get_u8();

    let pixel_type = PixelType::from_int(color_type)
        .ok_or_else(|| PngError::UnsupportedFile(format!("unknown color type {color_type}")))?;

    let depth = BitDepth::from_int(bit_depth)
        .ok_or_else(|| PngError::UnsupportedFile(format!("unknown bit depth {bit_depth}")))?;

    if !pixel_type.allows_depth(depth)
    {
        return Err(PngError::UnsupportedFile(format!(
            "bit depth {bit_depth} is not valid for color type {color_type}"
        )));
    }

    let compression_method = reader.get_u8();
    if compression_method != 0
    {
        return Err(PngError::UnsupportedFile(format!(
            "unknown compression method {compression_method}"
        )));
    }

    let filter_method = reader.get_u8();
    if filter_method != 0
    {
        return Err(PngError::UnsupportedFile(format!("unknown filter method {filter_method}")));
    }

    let interlace_method = reader.get_u8();
    if interlace_method > 1
    {
        return Err(PngError::UnsupportedFile(format!(
            "unknown interlace method {interlace_method}"
        )));
    }

    picture.width = width;
    picture.height = height;
    picture.bit_depth = bit_depth;
    picture.color_type = color_type;
    picture.sample_depth = bit_depth;
    picture.type_of_pixel = Some(pixel_type);
    picture.alpha_channel = pixel_type.has_alpha();
    picture.compression_method = compression_method;
    picture.filter_method = filter_method;
    picture.interlace_method = interlace_method;

    log::info!("width: {width}");
    log::info!("height: {height}");
    log::info!("bit depth: {bit_depth}");
    log::info!("color type: {color_type:?} ({pixel_type:?})");
    log::info!("interlace method: {interlace_method}");

    Ok(())
}

pub(crate) fn parse_plte(picture: &mut Picture, chunk: &Chunk) -> Result<(), PngError>
{
    if chunk.data.len() % 3 != 0
    {
        return Err(PngError::CorruptFile("PLTE length is not a multiple of 3".into()));
    }

    let entries = chunk.data.len() / 3;
    let max_entries = 1_usize << picture.bit_depth.min(8);

    if entries > max_entries
    {
        return Err(PngError::CorruptFile(format!(
            "PLTE has {entries} entries, more than 2^{} allowed by the bit depth",
            picture.bit_depth
        )));
    }

    picture.palette = Some(
        chunk
            .data
            .chunks_exact(3)
            .map(|rgb| PaletteEntry {
                red: rgb[0],
                green: rgb[1],
                blue: rgb[2],
                alpha: 255
            })
            .collect()
    );

    Ok(())
}

pub(crate) fn parse_trns(picture: &mut Picture, chunk: &Chunk) -> Result<(), PngError>
{
    let pixel_type = picture
        .type_of_pixel
        .ok_or_else(|| PngError::CorruptFile("tRNS before IHDR".into()))?;

    match pixel_type
    {
        PixelType::Grayscale =>
        {
            if chunk.data.len() != 2
            {
                return Err(PngError::CorruptFile("tRNS for grayscale must be 2 bytes".into()));
            }
            let sample = ZByteReader::new(chunk.data).get_u16_be();
            picture.fully_transparent_color = Some(TransparentColor::Gray(sample));
        }
        PixelType::Truecolor =>
        {
            if chunk.data.len() != 6
            {
                return Err(PngError::CorruptFile("tRNS for truecolor must be 6 bytes".into()));
            }
            let mut reader = ZByteReader::new(chunk.data);
            picture.fully_transparent_color = Some(TransparentColor::Rgb {
                red:   reader.get_u16_be(),
                green: reader.get_u16_be(),
                blue:  reader.get_u16_be()
            });
        }
        PixelType::IndexedColor =>
        {
            let palette = picture
                .palette
                .as_mut()
                .ok_or_else(|| PngError::CorruptFile("tRNS chunk before PLTE".into()))?;

            if chunk.data.len() > palette.len()
            {
                return Err(PngError::CorruptFile("tRNS has more entries than the palette".into()));
            }

            for (entry, &alpha) in palette.iter_mut().zip(chunk.data)
            {
                entry.alpha = alpha;
            }
        }
        PixelType::GrayscaleAlpha | PixelType::TruecolorAlpha =>
        {
            return Err(PngError::CorruptFile(
                "tRNS is not allowed for a color type that already carries alpha".into()
            ));
        }
    }

    Ok(())
}

pub(crate) fn parse_bkgd(picture: &mut Picture, chunk: &Chunk) -> Result<(), PngError>
{
    let pixel_type = picture
        .type_of_pixel
        .ok_or_else(|| PngError::CorruptFile("bKGD before IHDR".into()))?;

    let mut reader = ZByteReader::new(chunk.data);

    let color = match pixel_type
    {
        PixelType::Grayscale | PixelType::GrayscaleAlpha =>
        {
            if chunk.data.len() != 2
            {
                return Err(PngError::CorruptFile("bKGD for grayscale must be 2 bytes".into()));
            }
            BackgroundColor::Gray(reader.get_u16_be())
        }
        PixelType::Truecolor | PixelType::TruecolorAlpha =>
        {
            if chunk.data.len() != 6
            {
                return Err(PngError::CorruptFile("bKGD for truecolor must be 6 bytes".into()));
            }
            BackgroundColor::Rgb {
                red:   reader.get_u16_be(),
                green: reader.get_u16_be(),
                blue:  reader.get_u16_be()
            }
        }
        PixelType::IndexedColor =>
        {
            if chunk.data.len() != 1
            {
                return Err(PngError::CorruptFile("bKGD for indexed-color must be 1 byte".into()));
            }
            BackgroundColor::Palette(reader.get_u8())
        }
    };

    picture.background_color = Some(color);

    Ok(())
}

pub(crate) fn parse_gama(picture: &mut Picture, chunk: &Chunk, options: &PngOptions) -> Result<(), PngError>
{
    if chunk.data.len() != 4
    {
        let msg = format!("gAMA chunk length is not 4 but {}", chunk.data.len());

        if options.core.strict_mode
        {
            return Err(PngError::CorruptFile(msg));
        }

        log::warn!("{msg}, ignoring");
        return Ok(());
    }

    let raw = ZByteReader::new(chunk.data).get_u32_be();

    if raw == 0
    {
        log::warn!("gamma value of 0.0 is invalid, ignoring gAMA chunk");
        return Ok(());
    }

    picture.gamma = Some(Gamma(raw));

    Ok(())
}

pub(crate) fn parse_time(picture: &mut Picture, chunk: &Chunk) -> Result<(), PngError>
{
    if chunk.data.len() != 7
    {
        return Err(PngError::CorruptFile(format!(
            "tIME chunk length must be 7, got {}",
            chunk.data.len()
        )));
    }

    let mut reader = ZByteReader::new(chunk.data);

    picture.last_modification_time = Some(PngTime {
        year:   reader.get_u16_be(),
        month:  reader.get_u8(),
        day:    reader.get_u8(),
        hour:   reader.get_u8(),
        minute: reader.get_u8(),
        second: reader.get_u8()
    });

    Ok(())
}

pub(crate) fn parse_text(picture: &mut Picture, chunk: &Chunk) -> Result<(), PngError>
{
    let (keyword, text) = split_at_nul(chunk.data)?;

    picture.text_info.push(TextEntry {
        keyword: latin1_to_string(keyword),
        language: None,
        translated_keyword: None,
        text: latin1_to_string(text),
        compressed: false
    });

    Ok(())
}

pub(crate) fn parse_ztxt(picture: &mut Picture, chunk: &Chunk, options: &PngOptions) -> Result<(), PngError>
{
    let (keyword, rest) = split_at_nul(chunk.data)?;

    let (&compression_method, compressed_text) = rest
        .split_first()
        .ok_or_else(|| PngError::CorruptFile("zTXt missing compression method byte".into()))?;

    if compression_method != 0
    {
        return Err(PngError::UnsupportedFile(format!(
            "unsupported zTXt compression method {compression_method}"
        )));
    }

    let decoder = mini_inflate::DeflateDecoder::new_with_options(
        compressed_text,
        mini_inflate::DeflateOptions::default().set_confirm_checksum(options.confirm_adler32)
    );
    let inflated = decoder.decode_zlib()?;

    picture.text_info.push(TextEntry {
        keyword: latin1_to_string(keyword),
        language: None,
        translated_keyword: None,
        text: latin1_to_string(&inflated),
        compressed: true
    });

    Ok(())
}

pub(crate) fn parse_itxt(picture: &mut Picture, chunk: &Chunk, options: &PngOptions) -> Result<(), PngError>
{
    let data = chunk.data;

    let (keyword, rest) = split_at_nul(data)?;

    let (&compression_flag, rest) = rest
        .split_first()
        .ok_or_else(|| PngError::CorruptFile("iTXt missing compression flag".into()))?;
    let (&compression_method, rest) = rest
        .split_first()
        .ok_or_else(|| PngError::CorruptFile("iTXt missing compression method".into()))?;

    let (language, rest) = split_at_nul(rest)?;
    let (translated_keyword, payload) = split_at_nul(rest)?;

    let text = if compression_flag == 1
    {
        if compression_method != 0
        {
            return Err(PngError::UnsupportedFile(format!(
                "unsupported iTXt compression method {compression_method}"
            )));
        }

        let decoder = mini_inflate::DeflateDecoder::new_with_options(
            payload,
            mini_inflate::DeflateOptions::default().set_confirm_checksum(options.confirm_adler32)
        );
        String::from_utf8(decoder.decode_zlib()?)?
    }
    else
    {
        String::from_utf8(payload.to_vec())?
    };

    picture.text_info.push(TextEntry {
        keyword: String::from_utf8(keyword.to_vec())?,
        language: Some(String::from_utf8(language.to_vec())?),
        translated_keyword: Some(String::from_utf8(translated_keyword.to_vec())?),
        text,
        compressed: compression_flag == 1
    });

    Ok(())
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::chunk::{ChunkClassification, KnownChunk};

    fn chunk_of(data: &[u8]) -> Chunk
    {
        Chunk {
            chunk_type: *b"IHDR",
            classification: ChunkClassification::of(*b"IHDR"),
            kind: Some(KnownChunk::IHDR),
            data
        }
    }

    #[test]
    fn ihdr_rejects_zero_dimensions()
    {
        let mut data = vec![0_u8; 13];
        data[7] = 10; // height = 0, width = 0
        let mut picture = Picture::default();
        let chunk = chunk_of(&data);
        assert!(parse_ihdr(&mut picture, &chunk, &PngOptions::default()).is_err());
    }

    #[test]
    fn ihdr_accepts_truecolor_eight_bit()
    {
        let mut data = Vec::new();
        data.extend_from_slice(&10_u32.to_be_bytes());
        data.extend_from_slice(&20_u32.to_be_bytes());
        data.extend_from_slice(&[8, 2, 0, 0, 0]); // depth 8, color type 2 (truecolor)

        let mut picture = Picture::default();
        let chunk = chunk_of(&data);
        parse_ihdr(&mut picture, &chunk, &PngOptions::default()).unwrap();

        assert_eq!(picture.width, 10);
        assert_eq!(picture.height, 20);
        assert_eq!(picture.type_of_pixel, Some(PixelType::Truecolor));
        assert!(!picture.alpha_channel);
    }

    #[test]
    fn ihdr_rejects_sixteen_bit_indexed()
    {
        let mut data = Vec::new();
        data.extend_from_slice(&1_u32.to_be_bytes());
        data.extend_from_slice(&1_u32.to_be_bytes());
        data.extend_from_slice(&[16, 3, 0, 0, 0]); // depth 16, color type 3 (indexed)

        let mut picture = Picture::default();
        let chunk = chunk_of(&data);
        assert!(parse_ihdr(&mut picture, &chunk, &PngOptions::default()).is_err());
    }

    #[test]
    fn text_chunk_splits_keyword_and_text()
    {
        let mut picture = Picture::default();
        let data = b"Title\0Hello, World!";
        let chunk = chunk_of(data);
        parse_text(&mut picture, &chunk).unwrap();

        assert_eq!(picture.text_info[0].keyword, "Title");
        assert_eq!(picture.text_info[0].text, "Hello, World!");
    }

    #[test]
    fn trns_extends_palette_alpha()
    {
        let mut picture = Picture::default();
        picture.type_of_pixel = Some(PixelType::IndexedColor);
        picture.palette = Some(vec![
            PaletteEntry { red: 1, green: 2, blue: 3, alpha: 255 },
            PaletteEntry { red: 4, green: 5, blue: 6, alpha: 255 },
        ]);

        let chunk = chunk_of(&[10]);
        parse_trns(&mut picture, &chunk).unwrap();

        assert_eq!(picture.palette.as_ref().unwrap()[0].alpha, 10);
        assert_eq!(picture.palette.as_ref().unwrap()[1].alpha, 255);
    }
}
