//! Zlib (RFC 1950) framing around a raw DEFLATE stream
//!
//! Strips the 2-byte zlib header, validates it the way real-world decoders
//! do (method/window-size/FCHECK), drives [`Deflate`] over the remaining
//! bytes, and optionally verifies the trailing big-endian Adler-32.

use simd_adler32::Adler32;

use crate::deflate::Deflate;
use crate::errors::InflateError;

/// Inflate a zlib-framed byte sequence, verifying the trailing Adler-32
/// checksum against the inflated output when `confirm_checksum` is set.
pub fn inflate_zlib(data: &[u8], confirm_checksum: bool) -> Result<Vec<u8>, InflateError>
{
    if data.len() < 2 + 4
    {
        return Err(InflateError::UnexpectedEof);
    }

    let cmf = data[0];
    let flg = data[1];

    let compression_method = cmf & 0xF;
    let compression_info = cmf >> 4;

    if compression_method != 8
    {
        return Err(InflateError::UnsupportedZlibHeader("CM must be 8 (deflate)"));
    }

    if compression_info > 7
    {
        return Err(InflateError::UnsupportedZlibHeader("CINFO greater than 7"));
    }

    let header = (u16::from(cmf) << 8) | u16::from(flg);
    if header % 31 != 0
    {
        return Err(InflateError::UnsupportedZlibHeader("FCHECK integrity not preserved"));
    }

    // FDICT (preset dictionary) is not supported: the stream would need a
    // further 4-byte dictionary id we have no way to honor.
    if (flg >> 5) & 1 != 0
    {
        return Err(InflateError::UnsupportedZlibHeader("preset dictionaries are not supported"));
    }

    let inflated = Deflate::new(&data[2..]).decompress()?;

    if confirm_checksum
    {
        let trailer_start = data.len() - 4;
        let expected = u32::from_be_bytes([
            data[trailer_start],
            data[trailer_start + 1],
            data[trailer_start + 2],
            data[trailer_start + 3]
        ]);

        let mut hasher = Adler32::new();
        hasher.write(&inflated);
        let computed = hasher.finish();

        if expected != computed
        {
            return Err(InflateError::ChecksumMismatch(expected, computed));
        }
    }

    Ok(inflated)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn deflate_late_through_zlib_framing()
    {
        let mut data = vec![0x78, 0x9C];
        data.extend_from_slice(&[0x73, 0x49, 0x4D, 0xCB, 0x49, 0x2C, 0x49, 0x55, 0x00, 0x11, 0x00]);

        let mut hasher = Adler32::new();
        hasher.write(b"Deflate late");
        data.extend_from_slice(&hasher.finish().to_be_bytes());

        let out = inflate_zlib(&data, true).unwrap();
        assert_eq!(out, b"Deflate late");
    }

    #[test]
    fn rejects_bad_compression_method()
    {
        let data = [0x77, 0x01, 0, 0, 0, 0];
        assert!(inflate_zlib(&data, true).is_err());
    }
}
