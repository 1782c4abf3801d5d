//! PNG signature check and chunk iteration
//!
//! A PNG file is the 8-byte signature followed by a sequence of
//! length-prefixed, CRC-checked chunks. This module owns that framing;
//! [`crate::headers`] interprets what's inside each chunk's `data`.

use mini_core::bytestream::ZByteReader;

use crate::error::PngError;

pub(crate) const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// The fixed set of chunk types this crate interprets. Anything else is
/// handled by [`crate::options::UnknownChunkHandler`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[allow(non_camel_case_types)]
pub(crate) enum KnownChunk
{
    IHDR,
    PLTE,
    IDAT,
    IEND,
    bKGD,
    gAMA,
    iTXt,
    tEXt,
    tIME,
    tRNS,
    zTXt
}

impl KnownChunk
{
    pub(crate) fn from_type(chunk_type: &[u8; 4]) -> Option<KnownChunk>
    {
        match chunk_type
        {
            b"IHDR" => Some(KnownChunk::IHDR),
            b"PLTE" => Some(KnownChunk::PLTE),
            b"IDAT" => Some(KnownChunk::IDAT),
            b"IEND" => Some(KnownChunk::IEND),
            b"bKGD" => Some(KnownChunk::bKGD),
            b"gAMA" => Some(KnownChunk::gAMA),
            b"iTXt" => Some(KnownChunk::iTXt),
            b"tEXt" => Some(KnownChunk::tEXt),
            b"tIME" => Some(KnownChunk::tIME),
            b"tRNS" => Some(KnownChunk::tRNS),
            b"zTXt" => Some(KnownChunk::zTXt),
            _ => None
        }
    }
}

/// The four classification bits PNG derives from the case of each type
/// byte. Bit 5 (0x20, i.e. lowercase ASCII) of a byte being set is what
/// each flag tests.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct ChunkClassification
{
    /// Byte 0 lowercase: decoders that don't understand this chunk may
    /// ignore it.
    pub ancillary: bool,
    /// Byte 1 lowercase: chunk type is not part of the public PNG
    /// specification.
    pub private: bool,
    /// Byte 2 uppercase is the only value the spec defines; lowercase here
    /// flags a non-conformant encoder rather than invalidating the chunk.
    pub reserved_conformant: bool,
    /// Byte 3 lowercase: safe for an editor that doesn't understand this
    /// chunk to copy unmodified to an edited file.
    pub safe_to_copy: bool
}

impl ChunkClassification
{
    pub(crate) fn of(chunk_type: [u8; 4]) -> ChunkClassification
    {
        const LOWERCASE_BIT: u8 = 1 << 5;

        ChunkClassification {
            ancillary:           chunk_type[0] & LOWERCASE_BIT != 0,
            private:             chunk_type[1] & LOWERCASE_BIT != 0,
            reserved_conformant: chunk_type[2] & LOWERCASE_BIT == 0,
            safe_to_copy:        chunk_type[3] & LOWERCASE_BIT != 0
        }
    }
}

/// One chunk of a PNG file: `{ type, length-prefixed data, crc }`, already
/// classified and matched against the known-chunk set.
pub(crate) struct Chunk<'a>
{
    pub chunk_type:     [u8; 4],
    pub classification: ChunkClassification,
    pub kind:           Option<KnownChunk>,
    pub data:           &'a [u8]
}

/// Iterates the chunks of a PNG file after its signature has been
/// validated, verifying each chunk's CRC-32 as it goes.
pub(crate) struct PngChunkStream<'a>
{
    reader:      ZByteReader<'a>,
    confirm_crc: bool,
    done:        bool
}

impl<'a> PngChunkStream<'a>
{
    /// Validate the 8-byte signature and position the stream at the first
    /// chunk.
    pub(crate) fn new(data: &'a [u8], confirm_crc: bool) -> Result<PngChunkStream<'a>, PngError>
    {
        let mut reader = ZByteReader::new(data);

        let signature = reader.get_u64_be_err().map_err(|_| PngError::NotPng)?;

        if signature != u64::from_be_bytes(PNG_SIGNATURE)
        {
            return Err(PngError::NotPng);
        }

        Ok(PngChunkStream {
            reader,
            confirm_crc,
            done: false
        })
    }
}

impl<'a> Iterator for PngChunkStream<'a>
{
    type Item = Result<Chunk<'a>, PngError>;

    fn next(&mut self) -> Option<Self::Item>
    {
        if self.done
        {
            return None;
        }

        Some(self.read_next())
    }
}

impl<'a> PngChunkStream<'a>
{
    fn read_next(&mut self) -> Result<Chunk<'a>, PngError>
    {
        let length = self
            .reader
            .get_u32_be_err()
            .map_err(|_| PngError::CorruptFile("truncated chunk length".into()))?;

        let type_bytes = self
            .reader
            .get_as_ref(4)
            .map_err(|_| PngError::CorruptFile("truncated chunk type".into()))?;

        let mut chunk_type = [0_u8; 4];
        chunk_type.copy_from_slice(type_bytes);

        let data = self
            .reader
            .get_as_ref(length as usize)
            .map_err(|_| PngError::CorruptFile("truncated chunk data".into()))?;

        let crc = self
            .reader
            .get_u32_be_err()
            .map_err(|_| PngError::CorruptFile("truncated chunk crc".into()))?;

        if self.confirm_crc
        {
            #[cfg(feature = "crc")]
            {
                let mut hasher = crc32fast::Hasher::new();
                hasher.update(&chunk_type);
                hasher.update(data);
                let computed = hasher.finalize();

                if computed != crc
                {
                    return Err(PngError::CorruptFile(format!(
                        "CRC mismatch on {} chunk: expected {crc:#010x}, computed {computed:#010x}",
                        String::from_utf8_lossy(&chunk_type)
                    )));
                }
            }
        }

        if &chunk_type == b"IEND"
        {
            self.done = true;
        }

        Ok(Chunk {
            chunk_type,
            classification: ChunkClassification::of(chunk_type),
            kind: KnownChunk::from_type(&chunk_type),
            data
        })
    }
}
